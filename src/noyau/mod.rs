//! Noyau infixe ⇄ postfixe
//!
//! Organisation interne :
//! - erreur.rs     : erreurs typées (ErreurCalc)
//! - classement.rs : opérateurs, fonctions, précédence, littéraux
//! - jetons.rs     : tokenisation (mode infixe strict / postfixe tolérant)
//! - rpn.rs        : shunting-yard (infixe -> postfixe)
//! - infixe.rs     : reconstruction (postfixe -> infixe)
//! - eval.rs       : évaluation de la RPN
//! - format.rs     : nombres en texte
//! - traitement.rs : pipeline complet

pub mod classement;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod infixe;
pub mod jetons;
pub mod rpn;
pub mod traitement;

#[cfg(test)]
mod tests_scientifiques;



// API publique minimale
pub use erreur::ErreurCalc;
pub use eval::evaluate_postfix;
pub use infixe::convert_postfix_to_infix;
pub use rpn::convert_infix_to_postfix;
pub use traitement::process;
