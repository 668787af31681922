// src/noyau/classement.rs
//
// Prédicats purs partagés par toutes les étapes :
// - opérateurs binaires + précédence/associativité
// - fonctions unaires (noms + alias)
// - reconnaissance des littéraux numériques (virgule ou point)

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Divise),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Moins => '-',
            Self::Fois => '*',
            Self::Divise => '/',
            Self::Modulo => '%',
            Self::Puissance => '^',
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

pub fn precedence(op: Operateur) -> u8 {
    match op {
        Operateur::Plus | Operateur::Moins => 1,
        Operateur::Fois | Operateur::Divise | Operateur::Modulo => 2,
        Operateur::Puissance => 3,
    }
}

pub fn is_right_associative(op: Operateur) -> bool {
    matches!(op, Operateur::Puissance)
}

/// Fonctions unaires reconnues (angles en degrés pour la trigo).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Sqrt,
}

impl Fonction {
    /// Reconnaît un nom de fonction (insensible à la casse).
    /// Alias acceptés : sen, tg, log10, raiz.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom.to_lowercase().as_str() {
            "sin" | "sen" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" | "tg" => Some(Self::Tan),
            "log" | "log10" => Some(Self::Log),
            "sqrt" | "raiz" => Some(Self::Sqrt),
            _ => None,
        }
    }

    /// Nom canonique (minuscules) utilisé en sortie.
    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

pub fn is_operateur_binaire(mot: &str) -> bool {
    let mut it = mot.chars();
    matches!((it.next(), it.next()), (Some(c), None) if Operateur::depuis_char(c).is_some())
}

pub fn is_fonction_unaire(mot: &str) -> bool {
    Fonction::depuis_nom(mot).is_some()
}

pub fn est_separateur_decimal(c: char) -> bool {
    c == '.' || c == ','
}

/// Littéral décimal : signe '-' optionnel, chiffres, au plus un séparateur.
/// Refuse volontairement "inf", "NaN", exposants, etc. (que `f64::from_str` accepterait).
pub fn est_nombre(mot: &str) -> bool {
    let corps = mot.strip_prefix('-').unwrap_or(mot);

    let mut chiffres = 0usize;
    let mut separateurs = 0usize;
    for c in corps.chars() {
        if c.is_ascii_digit() {
            chiffres += 1;
        } else if est_separateur_decimal(c) {
            separateurs += 1;
        } else {
            return false;
        }
    }

    chiffres > 0 && separateurs <= 1
}

/// Lit un littéral décimal (virgule normalisée en point).
pub fn lire_nombre(mot: &str) -> Option<f64> {
    if !est_nombre(mot) {
        return None;
    }
    let normalise = mot.replace(',', ".");
    normalise.parse::<f64>().ok().filter(|v| v.is_finite())
}
