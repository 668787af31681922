// src/noyau/rpn.rs
//
// Shunting-yard : infixe -> RPN (postfixe)
//
// Règles:
// - Nombre   : sortie directe
// - Fonction : empilée, sort juste après la parenthèse fermante de son argument
// - '('      : empilée
// - ')'      : dépile jusqu’à '(' (erreur si absente), puis sort la fonction éventuelle
// - Opérateur: dépile tant que le sommet est un opérateur plus prioritaire
//              (ou de même priorité si l’opérateur entrant est associatif à gauche)
//
// NOTE:
// - '^' est associatif à droite : "2^3^2" => "2 3 2 ^ ^"
// - '(' restant en fin d’entrée => parenthèses non équilibrées
// - sortie vide ("", "()") => aucune valeur

use tracing::debug;

use super::classement::{is_right_associative, precedence};
use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize, Mode, Tok};

/// Convertit une suite de jetons infixes en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(45), Op(+), Num(60)]
///   rpn:    [Num(45), Num(60), Op(+)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::new();
    out.try_reserve(tokens.len())?;
    let mut ops: Vec<Tok> = Vec::new();
    ops.try_reserve(tokens.len())?;

    for &tok in tokens {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::Fonc(_) | Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurCalc::UnbalancedParentheses),
                    }
                }

                // si une fonction est au sommet, elle s’applique à ce groupe
                if let Some(f @ Tok::Fonc(_)) = ops.last().copied() {
                    ops.pop();
                    out.push(f);
                }
            }

            Tok::Op(op) => {
                // on s’arrête sur '(' et sur une fonction (collée à son argument)
                while let Some(&Tok::Op(top)) = ops.last() {
                    let p_top = precedence(top);
                    let p_op = precedence(op);

                    let doit_pop = p_top > p_op || (p_top == p_op && !is_right_associative(op));
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(Tok::Op(top));
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        if top == Tok::LPar {
            return Err(ErreurCalc::UnbalancedParentheses);
        }
        out.push(top);
    }

    // "" ou "()" : aucune valeur à calculer
    if out.is_empty() {
        return Err(ErreurCalc::ArityMismatch { restants: 0 });
    }

    Ok(out)
}

/// API texte : "(3+4)*5" -> "3 4 + 5 *"
pub fn convert_infix_to_postfix(expr: &str) -> Result<String, ErreurCalc> {
    let jetons = tokenize(expr, Mode::Infixe)?;
    let rpn = to_rpn(&jetons)?;
    let txt = format_tokens(&rpn);
    debug!(entree = expr, rpn = %txt, "infixe -> postfixe");
    Ok(txt)
}
