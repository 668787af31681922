// src/noyau/format.rs

/// Nombre en texte (jetons, infixe reconstruite).
/// Forme la plus courte qui relit la même valeur : 3, 0.5, -1.25.
pub fn format_nombre(v: f64) -> String {
    // -0 => 0 (sinon "-0" se relirait comme un signe collé)
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Valeur calculée pour l’affichage : `digits` décimales fixes.
pub fn format_valeur(v: f64, digits: usize) -> String {
    let s = format!("{v:.digits$}");
    // "-0.000000" => "0.000000"
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return s[1..].to_string();
    }
    s
}
