//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, notation détectée, conversion,
//! valeur, erreur, digits, démarche) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la précision d’affichage (digits).

use crate::noyau::format::format_valeur;

/// Décimales affichées par défaut.
const DIGITS_DEFAUT: usize = 6;

/// Au-delà, un f64 n’a plus de chiffres significatifs à montrer.
const DIGITS_MAX: usize = 15;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub notation: String,
    pub jetons: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub notation: String,       // "postfixe" / "infixe" (notation détectée de l’entrée)
    pub convertie: String,      // expression dans l’autre notation
    pub valeur: Option<f64>,    // valeur brute (None si rien à lire)
    pub valeur_txt: String,     // valeur formatée selon digits
    pub erreur: String,         // message d’erreur (si conversion/éval échoue)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub digits: usize, // décimales affichées

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            notation: String::new(),
            convertie: String::new(),
            valeur: None, // au démarrage : rien à lire
            valeur_txt: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            digits: DIGITS_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.notation.clear();
        self.convertie.clear();
        self.valeur = None;
        self.valeur_txt.clear();
        self.erreur.clear();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Le traitement est atomique : en cas d’erreur, aucune sortie partielle ne reste affichée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.clear_resultats();
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (conversion + valeur + démarche).
    pub fn set_resultats(
        &mut self,
        notation: impl Into<String>,
        convertie: impl Into<String>,
        valeur: Option<f64>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.notation = notation.into();
        self.convertie = convertie.into();
        self.demarche = demarche;
        self.valeur = valeur;
        self.refresh_valeur_txt();
        self.focus_entree = true;
    }

    /// Borne digits, puis reformate la valeur courante.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.clamp(0, DIGITS_MAX);
        self.refresh_valeur_txt();
        self.focus_entree = true;
    }

    fn refresh_valeur_txt(&mut self) {
        self.valeur_txt = match self.valeur {
            Some(v) => format_valeur(v, self.digits),
            None => String::new(),
        };
    }
}
