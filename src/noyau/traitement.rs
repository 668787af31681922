//! Noyau — pipeline complet (point d’entrée de l’app)
//!
//! entrée brute -> détection de notation
//!   - postfixe : jetons -> infixe reconstruite + valeur
//!   - infixe   : jetons -> RPN (shunting-yard) -> postfixe texte + valeur
//!
//! Atomique : une étape en erreur => aucune sortie partielle.

use tracing::{debug, info};

use super::classement::{is_fonction_unaire, is_operateur_binaire, est_nombre};
use super::erreur::ErreurCalc;
use super::eval::evaluer_rpn;
use super::infixe::from_rpn;
use super::jetons::{format_tokens, tokenize, Mode};
use super::rpn::to_rpn;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub notation: String,
    pub jetons: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct Traitement {
    pub est_postfixe: bool,
    /// Expression dans l’autre notation.
    pub convertie: String,
    pub valeur: f64,
    pub demarche: DemarcheNoyau,
}

/// Heuristique postfixe : pas de parenthèses, et une simulation d’arité
/// sur les mots (séparés par des blancs) se termine avec exactement 1 valeur.
/// Un nombre seul est donc postfixe (et infixe) trivialement.
pub fn est_postfixe(s: &str) -> bool {
    if s.contains(['(', ')']) {
        return false;
    }

    let mut profondeur: usize = 0;
    for mot in s.split_whitespace() {
        if est_nombre(mot) {
            profondeur += 1;
        } else if is_operateur_binaire(mot) {
            if profondeur < 2 {
                return false;
            }
            profondeur -= 1;
        } else if is_fonction_unaire(mot) {
            if profondeur < 1 {
                return false;
            }
        } else {
            return false;
        }
    }

    profondeur == 1
}

/// API publique : détecte la notation, convertit et évalue.
pub fn process(expr: &str) -> Result<Traitement, ErreurCalc> {
    let s = expr.trim();

    let t = if est_postfixe(s) {
        let jetons = tokenize(s, Mode::Postfixe)?;
        let infixe = from_rpn(&jetons)?;
        let valeur = evaluer_rpn(&jetons)?;
        let rpn_txt = format_tokens(&jetons);

        Traitement {
            est_postfixe: true,
            convertie: infixe,
            valeur,
            demarche: DemarcheNoyau {
                notation: "postfixe".into(),
                jetons: rpn_txt.clone(),
                rpn: rpn_txt,
                note: "Pipeline: jetons (postfixe) → infixe reconstruite → pile de valeurs."
                    .into(),
            },
        }
    } else {
        let jetons = tokenize(s, Mode::Infixe)?;
        let jetons_txt = format_tokens(&jetons);
        debug!(jetons = %jetons_txt, "jetons infixes");

        let rpn = to_rpn(&jetons)?;
        let valeur = evaluer_rpn(&rpn)?;
        let rpn_txt = format_tokens(&rpn);

        Traitement {
            est_postfixe: false,
            convertie: rpn_txt.clone(),
            valeur,
            demarche: DemarcheNoyau {
                notation: "infixe".into(),
                jetons: jetons_txt,
                rpn: rpn_txt,
                note: "Pipeline: jetons (infixe) → shunting-yard → RPN → pile de valeurs.".into(),
            },
        }
    };

    info!(
        entree = s,
        postfixe = t.est_postfixe,
        convertie = %t.convertie,
        valeur = t.valeur,
        "expression traitée"
    );
    Ok(t)
}
