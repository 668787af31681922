// src/noyau/infixe.rs
//
// RPN -> infixe, avec le minimum de parenthèses.
//
// Chaque fragment garde la précédence de son opérateur racine :
// - nombre / appel de fonction : atomique (jamais entouré)
// - a op b : précédence de op
//
// Parenthèses (op = opérateur qui combine):
// - gauche : si prec(gauche) < prec(op), ou égale et op associatif à droite
// - droite : si prec(droite) < prec(op), ou égale et op associatif à gauche
//   => "a-(b-c)" garde ses parenthèses, "a^b^c" n’en a pas besoin

use tracing::debug;

use super::classement::{is_right_associative, precedence};
use super::erreur::ErreurCalc;
use super::format::format_nombre;
use super::jetons::{format_tok, tokenize, Mode, Tok};

const ATOMIQUE: u8 = u8::MAX;

struct Fragment {
    texte: String,
    prec: u8,
}

fn entoure(f: Fragment, parentheses: bool) -> String {
    if parentheses {
        format!("({})", f.texte)
    } else {
        f.texte
    }
}

fn depile(st: &mut Vec<Fragment>, tok: &Tok, attendus: usize) -> Result<Fragment, ErreurCalc> {
    let presents = st.len();
    st.pop().ok_or_else(|| ErreurCalc::StackUnderflow {
        jeton: format_tok(tok),
        attendus,
        presents,
    })
}

/// Reconstruit une expression infixe à partir d’une RPN.
///
/// Exemple:
///   rpn:     [Num(3), Num(4), Op(+), Num(5), Op(*)]
///   infixe:  "(3+4)*5"
pub fn from_rpn(rpn: &[Tok]) -> Result<String, ErreurCalc> {
    let mut st: Vec<Fragment> = Vec::new();
    st.try_reserve(rpn.len())?;

    for tok in rpn {
        match *tok {
            Tok::Num(v) => st.push(Fragment {
                texte: format_nombre(v),
                prec: ATOMIQUE,
            }),

            Tok::Fonc(f) => {
                let arg = depile(&mut st, tok, 1)?;
                st.push(Fragment {
                    texte: format!("{f}({})", arg.texte),
                    prec: ATOMIQUE,
                });
            }

            Tok::Op(op) => {
                if st.len() < 2 {
                    return Err(ErreurCalc::StackUnderflow {
                        jeton: op.to_string(),
                        attendus: 2,
                        presents: st.len(),
                    });
                }
                let droite = depile(&mut st, tok, 2)?;
                let gauche = depile(&mut st, tok, 2)?;

                let p = precedence(op);
                let par_gauche =
                    gauche.prec < p || (gauche.prec == p && is_right_associative(op));
                let par_droite =
                    droite.prec < p || (droite.prec == p && !is_right_associative(op));

                let texte = format!(
                    "{}{op}{}",
                    entoure(gauche, par_gauche),
                    entoure(droite, par_droite)
                );
                st.push(Fragment { texte, prec: p });
            }

            // Une RPN n’a pas de parenthèses
            Tok::LPar | Tok::RPar => return Err(ErreurCalc::UnknownToken(format_tok(tok))),
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalc::ArityMismatch {
            restants: st.len(),
        });
    }
    st.pop()
        .map(|f| f.texte)
        .ok_or(ErreurCalc::ArityMismatch { restants: 0 })
}

/// API texte : "3 4 + 5 *" -> "(3+4)*5"
pub fn convert_postfix_to_infix(expr: &str) -> Result<String, ErreurCalc> {
    let jetons = tokenize(expr, Mode::Postfixe)?;
    let txt = from_rpn(&jetons)?;
    debug!(entree = expr, infixe = %txt, "postfixe -> infixe");
    Ok(txt)
}
