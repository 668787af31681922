// src/noyau/erreur.rs
//
// Erreurs typées du noyau.
// Chaque étape (jetons, RPN, infixe, évaluation) renvoie un Result<_, ErreurCalc> :
// jamais de valeur sentinelle (NaN, chaîne vide…) pour signaler un échec.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalc {
    /// Mot, caractère ou littéral non reconnu.
    #[error("jeton inconnu: '{0}'")]
    UnknownToken(String),

    #[error("parenthèses non équilibrées")]
    UnbalancedParentheses,

    /// Pas assez d’opérandes pour un opérateur ou une fonction.
    #[error("opérandes manquants pour '{jeton}' ({presents} sur {attendus})")]
    StackUnderflow {
        jeton: String,
        attendus: usize,
        presents: usize,
    },

    /// Fin d’expression avec ≠ 1 valeur sur la pile.
    #[error("expression invalide: {restants} valeur(s) restante(s) au lieu de 1")]
    ArityMismatch { restants: usize },

    #[error("division par zéro")]
    DivisionByZero,

    #[error("hors domaine: {0}")]
    DomainError(String),

    #[error("mémoire insuffisante")]
    AllocationFailure,
}

impl From<TryReserveError> for ErreurCalc {
    fn from(_: TryReserveError) -> Self {
        ErreurCalc::AllocationFailure
    }
}
