// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter traite l’entrée, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Postfixe : bouton "␣" (l’espace sépare les jetons)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use tracing::debug;

use super::etat::{AppCalc, Demarche};
use crate::noyau::{self, ErreurCalc};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice postfixe");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée (infixe ou postfixe) :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3 4 + 5 *, (45+60)*cos(30), 2^3^2")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter traite (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.lancer(Operation::Traiter);
        }

        // --- Clavier : Backspace (seulement si le champ est focus) ---
        // TextEdit gère déjà Backspace “normal”, backspace_entree() retire un nom de fonction entier.
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            self.backspace_entree();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        // Actions + précision
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultats + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("Précision :");
            let mut d = self.digits as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=15)
                    .suffix(" décimales"),
            );
            if resp.changed() {
                self.set_digits(d as usize);
            }
        });

        ui.add_space(8.0);

        // Touches rapides
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "%", "%", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "sin", "sin", InsertKind::Func);
            self.bouton_insert(ui, "cos", "cos", InsertKind::Func);
            self.bouton_insert(ui, "tan", "tan", InsertKind::Func);
            self.bouton_insert(ui, "log", "log", InsertKind::Func);
            self.bouton_insert(ui, "sqrt", "sqrt", InsertKind::Func);
        });

        ui.add_space(8.0);

        // Opérations du noyau
        ui.horizontal_wrapped(|ui| {
            self.bouton_operation(ui, "=", "Détecte la notation, convertit et évalue", Operation::Traiter);
            self.bouton_operation(ui, "→ Postfixe", "Infixe vers postfixe", Operation::VersPostfixe);
            self.bouton_operation(ui, "→ Infixe", "Postfixe vers infixe", Operation::VersInfixe);
            self.bouton_operation(ui, "Évaluer", "Évalue une expression postfixe", Operation::Evaluer);
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_postfixe")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "␣", " ", InsertKind::Espace);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ",", ",", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup un nom de fonction entier.
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus
        for pat in ["sqrt(", "sin(", "cos(", "tan(", "log(", "sqrt", "sin", "cos", "tan", "log"] {
            if self.entree.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Notation détectée :");
        Self::champ_monospace(ui, "notation_out", &self.notation, 1);

        ui.add_space(6.0);

        ui.label("Conversion :");
        Self::champ_monospace(ui, "convertie_out", &self.convertie, 2);

        ui.add_space(6.0);

        ui.label("Valeur :");
        if self.valeur.is_some() {
            Self::champ_monospace(ui, "valeur_out", &self.valeur_txt, 1);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Notation", "demarche_notation", &self.demarche.notation);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_operation(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, op: Operation) {
        let resp = ui
            .add_sized([88.0, 32.0], egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.lancer(op);
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen => {
                if let Some(c) = self.entree.chars().rev().find(|c| !c.is_whitespace()) {
                    if c.is_ascii_digit() || c == ')' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op | InsertKind::Func => {
                // jetons isolés par des espaces : valable en infixe comme en postfixe
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Espace => {
                if !self.entree.is_empty() && !self.entree.ends_with(' ') {
                    self.entree.push(' ');
                }
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Appelle le noyau, puis dépose conversion/valeur/démarche dans l’état UI.
    fn lancer(&mut self, op: Operation) {
        self.focus_entree = true;

        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        debug!(?op, entree = %s, "opération demandée");

        let r: Result<(String, String, Option<f64>, Demarche), ErreurCalc> = match op {
            Operation::Traiter => noyau::process(&s).map(|t| {
                let d = Demarche {
                    notation: t.demarche.notation,
                    jetons: t.demarche.jetons,
                    rpn: t.demarche.rpn,
                    note: t.demarche.note,
                };
                let notation = if t.est_postfixe { "postfixe" } else { "infixe" };
                (notation.to_string(), t.convertie, Some(t.valeur), d)
            }),
            Operation::VersPostfixe => noyau::convert_infix_to_postfix(&s)
                .map(|p| ("infixe".to_string(), p, None, Demarche::default())),
            Operation::VersInfixe => noyau::convert_postfix_to_infix(&s)
                .map(|i| ("postfixe".to_string(), i, None, Demarche::default())),
            Operation::Evaluer => noyau::evaluate_postfix(&s)
                .map(|v| ("postfixe".to_string(), String::new(), Some(v), Demarche::default())),
        };

        match r {
            Ok((notation, convertie, valeur, d)) => {
                self.set_resultats(notation, convertie, valeur, d);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum Operation {
    Traiter,
    VersPostfixe,
    VersInfixe,
    Evaluer,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Espace,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
