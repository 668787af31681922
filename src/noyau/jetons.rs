// src/noyau/jetons.rs

use tracing::trace;

use super::classement::{est_separateur_decimal, lire_nombre, Fonction, Operateur};
use super::erreur::ErreurCalc;
use super::format::format_nombre;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operateur),
    Fonc(Fonction),

    LPar,
    RPar,
}

/// Mode de lecture : l’appelant choisit explicitement.
/// - Infixe   : strict, tout caractère inconnu est une erreur
/// - Postfixe : tolérant, les caractères inconnus sont ignorés
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Infixe,
    Postfixe,
}

fn est_debut_nombre(c: char) -> bool {
    c.is_ascii_digit() || est_separateur_decimal(c)
}

/// Premier caractère non blanc à partir de `i` (ou `chars.len()`).
fn prochain_significatif(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Un opérande vient de se terminer à la profondeur courante :
/// ferme les négations "(-1 * …" ouvertes à ce niveau (en cascade).
fn ferme_negations(out: &mut Vec<Tok>, negations: &mut Vec<usize>, profondeur: &mut usize) {
    while negations.last().copied() == Some(*profondeur) {
        negations.pop();
        out.push(Tok::RPar);
        *profondeur -= 1;
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, 3,5) -> Num (virgule normalisée en point)
/// - opérateurs + - * / % ^
/// - parenthèses ( )
/// - fonctions sin cos tan log sqrt (+ alias sen tg log10 raiz), insensibles à la casse
/// - moins unaire (infixe) : "-3" ou "- 3" -> Num(-3) ;
///   "-(…)" / "-cos(…)" -> ( Num(-1) Op(*) … ) refermé juste après l’opérande
pub fn tokenize(s: &str, mode: Mode) -> Result<Vec<Tok>, ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();

    let mut out: Vec<Tok> = Vec::new();
    out.try_reserve(chars.len())?;

    let mut i: usize = 0;

    // Vrai au début, après un opérateur, une fonction ou '(' :
    // un '-' à cet endroit est un signe, pas une soustraction.
    let mut attend_operande = true;

    // Profondeur de parenthèses émises, et niveaux des négations à refermer.
    let mut profondeur: usize = 0;
    let mut negations: Vec<usize> = Vec::new();

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            profondeur += 1;
            attend_operande = true;
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            profondeur = profondeur.saturating_sub(1);
            // ")" juste après "-" : négation sans opérande, on l’abandonne
            while negations.last().is_some_and(|&n| n > profondeur) {
                negations.pop();
            }
            ferme_negations(&mut out, &mut negations, &mut profondeur);
            attend_operande = false;
            i += 1;
            continue;
        }

        // Nombre signé : "-3" (infixe en position d’opérande, blancs permis ; postfixe collé)
        let j = match mode {
            Mode::Infixe => prochain_significatif(&chars, i + 1),
            Mode::Postfixe => i + 1,
        };
        let suivant_est_nombre = j < chars.len() && est_debut_nombre(chars[j]);
        let signe = match mode {
            Mode::Infixe => c == '-' && attend_operande,
            Mode::Postfixe => c == '-' && suivant_est_nombre,
        };

        if est_debut_nombre(c) || (signe && suivant_est_nombre) {
            let mut mot = String::new();
            if c == '-' {
                mot.push('-');
                i = j;
            }
            let start = i;
            while i < chars.len() && est_debut_nombre(chars[i]) {
                i += 1;
            }
            mot.extend(&chars[start..i]);
            let v = lire_nombre(&mot).ok_or(ErreurCalc::UnknownToken(mot))?;
            out.push(Tok::Num(v));
            ferme_negations(&mut out, &mut negations, &mut profondeur);
            attend_operande = false;
            continue;
        }

        // Signe devant autre chose qu’un littéral : -x => (-1 * x)
        if signe {
            out.push(Tok::LPar);
            out.push(Tok::Num(-1.0));
            out.push(Tok::Op(Operateur::Fois));
            profondeur += 1;
            negations.push(profondeur);
            i += 1;
            continue;
        }

        // Plus unaire : sans effet
        if c == '+' && attend_operande && mode == Mode::Infixe {
            i += 1;
            continue;
        }

        // Opérateurs
        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Tok::Op(op));
            attend_operande = true;
            i += 1;
            continue;
        }

        // Identifiants : suite de lettres (normalisée en minuscules), "log10" compris
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mut mot: String = chars[start..i].iter().collect::<String>().to_lowercase();

            // "log10" mais pas "log100" (= log 100)
            let suffixe_10 = chars.get(i..i + 2) == Some(&['1', '0'][..]);
            let apres = chars.get(i + 2).copied();
            if mot == "log" && suffixe_10 && !apres.is_some_and(est_debut_nombre) {
                mot.push_str("10");
                i += 2;
            }

            let f = Fonction::depuis_nom(&mot).ok_or(ErreurCalc::UnknownToken(mot))?;
            out.push(Tok::Fonc(f));
            attend_operande = true;
            continue;
        }

        match mode {
            Mode::Infixe => return Err(ErreurCalc::UnknownToken(c.to_string())),
            Mode::Postfixe => {
                trace!(caractere = %c, position = i, "caractère ignoré (postfixe)");
                i += 1;
            }
        }
    }

    // "3*-" : la négation ouverte en fin d’entrée se referme sur rien
    ferme_negations(&mut out, &mut negations, &mut profondeur);

    Ok(out)
}

pub fn format_tok(t: &Tok) -> String {
    match t {
        Tok::Num(v) => format_nombre(*v),
        Tok::Op(op) => op.to_string(),
        Tok::Fonc(f) => f.to_string(),
        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),
    }
}

/// Liste de jetons en texte, séparés par une espace.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(format_tok).collect::<Vec<_>>().join(" ")
}
