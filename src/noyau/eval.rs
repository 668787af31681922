//! Noyau — évaluation d’une RPN (machine à pile)
//!
//! Nombre -> empile ; fonction -> dépile 1, empile f(x) ; opérateur -> dépile 2 (droite d’abord).
//! En fin d’entrée il doit rester exactement une valeur.
//!
//! Toute valeur non finie (débordement, NaN) est refusée : le résultat est toujours fini.

use tracing::debug;

use super::classement::{Fonction, Operateur};
use super::erreur::ErreurCalc;
use super::jetons::{format_tok, tokenize, Mode, Tok};

/// |cos(x)| sous ce seuil => tan(x) indéfinie.
pub const EPSILON_TANGENTE: f64 = 1e-12;

pub fn applique_operateur(op: Operateur, a: f64, b: f64) -> Result<f64, ErreurCalc> {
    let r = match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise => {
            if b == 0.0 {
                return Err(ErreurCalc::DivisionByZero);
            }
            a / b
        }
        Operateur::Modulo => {
            if b == 0.0 {
                return Err(ErreurCalc::DivisionByZero);
            }
            a % b
        }
        Operateur::Puissance => a.powf(b),
    };

    if !r.is_finite() {
        return Err(ErreurCalc::DomainError(format!("{a} {op} {b} non fini")));
    }
    Ok(r)
}

/// Trigo en degrés.
pub fn applique_fonction(f: Fonction, x: f64) -> Result<f64, ErreurCalc> {
    let r = match f {
        Fonction::Sin => x.to_radians().sin(),
        Fonction::Cos => x.to_radians().cos(),
        Fonction::Tan => {
            let rad = x.to_radians();
            if rad.cos().abs() < EPSILON_TANGENTE {
                return Err(ErreurCalc::DomainError(format!("tan({x}) indéfinie")));
            }
            rad.tan()
        }
        Fonction::Log => {
            if x <= 0.0 {
                return Err(ErreurCalc::DomainError(format!("log({x}) avec argument ≤ 0")));
            }
            x.log10()
        }
        Fonction::Sqrt => {
            if x < 0.0 {
                return Err(ErreurCalc::DomainError(format!("sqrt({x}) négatif")));
            }
            x.sqrt()
        }
    };

    if !r.is_finite() {
        return Err(ErreurCalc::DomainError(format!("{f}({x}) non fini")));
    }
    Ok(r)
}

/// Évalue une RPN déjà tokenisée.
pub fn evaluer_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalc> {
    let mut pile: Vec<f64> = Vec::new();
    pile.try_reserve(rpn.len())?;

    for tok in rpn {
        match *tok {
            Tok::Num(v) => pile.push(v),

            Tok::Fonc(f) => {
                let x = pile.pop().ok_or_else(|| ErreurCalc::StackUnderflow {
                    jeton: f.to_string(),
                    attendus: 1,
                    presents: 0,
                })?;
                pile.push(applique_fonction(f, x)?);
            }

            Tok::Op(op) => {
                let presents = pile.len();
                let manque = || ErreurCalc::StackUnderflow {
                    jeton: op.to_string(),
                    attendus: 2,
                    presents,
                };
                if presents < 2 {
                    return Err(manque());
                }
                let b = pile.pop().ok_or_else(manque)?;
                let a = pile.pop().ok_or_else(manque)?;
                pile.push(applique_operateur(op, a, b)?);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurCalc::UnknownToken(format_tok(tok))),
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(ErreurCalc::ArityMismatch {
            restants: pile.len(),
        }),
    }
}

/// API texte : "3 4 + 5 *" -> 35.0
pub fn evaluate_postfix(expr: &str) -> Result<f64, ErreurCalc> {
    let jetons = tokenize(expr, Mode::Postfixe)?;
    let v = evaluer_rpn(&jetons)?;
    debug!(entree = expr, valeur = v, "évaluation postfixe");
    Ok(v)
}
