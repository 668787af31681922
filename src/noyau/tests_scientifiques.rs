//! Tests scientifiques (campagne) : scénarios littéraux + précédence + erreurs typées.
//!
//! But : couvrir chaque étape du pipeline par l’API texte, comme l’app l’appelle.
//! - conversions infixe -> postfixe et postfixe -> infixe
//! - valeurs numériques (tolérance relative 1e-5)
//! - chaque genre d’erreur au moins une fois
//! - batterie de démonstration (paires postfixe / infixe équivalentes)

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize, Mode, Tok};
use super::{
    convert_infix_to_postfix, convert_postfix_to_infix, evaluate_postfix, process,
};

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-5 * a.abs().max(b.abs()).max(1.0)
}

fn assert_valeur(expr_postfixe: &str, attendu: f64) {
    let v = evaluate_postfix(expr_postfixe)
        .unwrap_or_else(|e| panic!("expr={expr_postfixe:?} err={e}"));
    assert!(proche(v, attendu), "expr={expr_postfixe:?} v={v} attendu={attendu}");
}

fn valeur_infixe(expr: &str) -> f64 {
    let rpn = convert_infix_to_postfix(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    evaluate_postfix(&rpn).unwrap_or_else(|e| panic!("rpn={rpn:?} err={e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Jetons ------------------------ */

#[test]
fn sci_jetons_virgule_et_casse() {
    let j = tokenize("COS(3,5) + Raiz(2)", Mode::Infixe).unwrap();
    assert_eq!(format_tokens(&j), "cos ( 3.5 ) + sqrt ( 2 )");
}

#[test]
fn sci_jetons_moins_unaire() {
    // signe en position d’opérande, soustraction sinon
    let j = tokenize("-3 - -4", Mode::Infixe).unwrap();
    assert_eq!(j.len(), 3);
    assert_eq!(j[0], Tok::Num(-3.0));
    assert_eq!(j[2], Tok::Num(-4.0));

    // "- 3" : le blanc n’empêche pas le signe
    assert_eq!(tokenize("2^- 3", Mode::Infixe).unwrap()[2], Tok::Num(-3.0));

    // -(…) => ( -1 * (…) ), refermé juste après l’opérande
    assert_eq!(
        format_tokens(&tokenize("-(2)", Mode::Infixe).unwrap()),
        "( -1 * ( 2 ) )"
    );
    assert_eq!(
        format_tokens(&tokenize("8/-cos(60)", Mode::Infixe).unwrap()),
        "8 / ( -1 * cos ( 60 ) )"
    );
    assert_eq!(
        format_tokens(&tokenize("--(2)", Mode::Infixe).unwrap()),
        "( -1 * ( -1 * ( 2 ) ) )"
    );
}

#[test]
fn sci_jetons_identifiants_lettres() {
    // suite de lettres : le nombre collé est un jeton à part
    assert_eq!(convert_infix_to_postfix("sen45").unwrap(), "45 sin");
    assert_eq!(convert_infix_to_postfix("COS30 * 2").unwrap(), "30 2 * cos");
    assert_eq!(convert_infix_to_postfix("log100").unwrap(), "100 log");
    // "log10" reste le nom de la fonction
    assert_eq!(convert_infix_to_postfix("log10(1000)").unwrap(), "1000 log");
    assert_eq!(convert_infix_to_postfix("log10 100").unwrap(), "100 log");
    assert_eq!(
        convert_infix_to_postfix("foo2"),
        Err(ErreurCalc::UnknownToken("foo".into()))
    );
}

#[test]
fn sci_jetons_mode_explicite() {
    // strict en infixe
    assert_eq!(
        tokenize("3 $ 4", Mode::Infixe),
        Err(ErreurCalc::UnknownToken("$".into()))
    );
    // tolérant en postfixe
    assert_eq!(
        format_tokens(&tokenize("3 $ 4 +", Mode::Postfixe).unwrap()),
        "3 4 +"
    );
    // postfixe : "-4" collé est un nombre, "-" isolé un opérateur
    assert_eq!(
        format_tokens(&tokenize("3 -4 -", Mode::Postfixe).unwrap()),
        "3 -4 -"
    );
}

#[test]
fn sci_jetons_fonction_inconnue() {
    assert_eq!(
        convert_infix_to_postfix("foo(2)"),
        Err(ErreurCalc::UnknownToken("foo".into()))
    );
    assert_eq!(
        evaluate_postfix("2 exp"),
        Err(ErreurCalc::UnknownToken("exp".into()))
    );
    assert!(matches!(
        convert_infix_to_postfix("1.2.3 + 1"),
        Err(ErreurCalc::UnknownToken(_))
    ));
}

/* ------------------------ Conversions ------------------------ */

#[test]
fn sci_infixe_vers_postfixe() {
    assert_eq!(convert_infix_to_postfix("(3 + 4) * 5").unwrap(), "3 4 + 5 *");
    assert_eq!(convert_infix_to_postfix("2+3*4").unwrap(), "2 3 4 * +");
    assert_eq!(convert_infix_to_postfix("2^3^2").unwrap(), "2 3 2 ^ ^");
    assert_eq!(convert_infix_to_postfix("8-3-2").unwrap(), "8 3 - 2 -");
    assert_eq!(
        convert_infix_to_postfix("(45+60)*cos(30)").unwrap(),
        "45 60 + 30 cos *"
    );
    assert_eq!(
        convert_infix_to_postfix("sen(45) ^ 2 + 0,5").unwrap(),
        "45 sin 2 ^ 0.5 +"
    );
}

#[test]
fn sci_postfixe_vers_infixe() {
    assert_eq!(convert_postfix_to_infix("3 4 + 5 *").unwrap(), "(3+4)*5");
    assert_eq!(convert_postfix_to_infix("8 3 2 - -").unwrap(), "8-(3-2)");
    assert_eq!(convert_postfix_to_infix("8 3 - 2 -").unwrap(), "8-3-2");
    assert_eq!(convert_postfix_to_infix("2 3 2 ^ ^").unwrap(), "2^3^2");
    assert_eq!(convert_postfix_to_infix("2 3 ^ 2 ^").unwrap(), "(2^3)^2");
    assert_eq!(convert_postfix_to_infix("2 3 4 % *").unwrap(), "2*(3%4)");
    assert_eq!(
        convert_postfix_to_infix("0.5 45 SEN 2 ^ +").unwrap(),
        "0.5+sin(45)^2"
    );
    assert_eq!(convert_postfix_to_infix("2 3 + log").unwrap(), "log(2+3)");
}

/* ------------------------ Valeurs ------------------------ */

#[test]
fn sci_precedence_et_associativite() {
    assert!(proche(valeur_infixe("2+3*4"), 14.0));
    assert!(proche(valeur_infixe("2^3^2"), 512.0));
    assert!(proche(valeur_infixe("(2^3)^2"), 64.0));
    assert!(proche(valeur_infixe("7 % 4 * 2"), 6.0));
    assert!(proche(valeur_infixe("-2^2"), 4.0));
    assert!(proche(valeur_infixe("-(2^2)"), -4.0));
    assert!(proche(valeur_infixe("2 * -3"), -6.0));

    // la négation ne porte que sur son opérande, même après / % ^
    assert!(proche(valeur_infixe("8/-(2)"), -4.0));
    assert!(proche(valeur_infixe("2^-(1+1)"), 0.25));
    assert!(proche(valeur_infixe("8%-(3)"), 2.0));
    assert!(proche(valeur_infixe("2^- 3"), 0.125));
    assert!(proche(valeur_infixe("8/- 2"), -4.0));
    assert!(proche(valeur_infixe("-cos(60)*2"), -1.0));
    assert!(proche(valeur_infixe("--(2)"), 2.0));
    assert!(proche(valeur_infixe("10/-(2)^2"), 2.5));
}

#[test]
fn sci_fonctions_en_degres() {
    assert_valeur("30 sin", 0.5);
    assert_valeur("60 cos", 0.5);
    assert_valeur("45 tg", 1.0);
    assert_valeur("1000 log", 3.0);
    assert_valeur("2,25 raiz", 1.5);
    assert_valeur("2 -1 ^", 0.5);
    assert_valeur("-7 3 %", -1.0);
}

#[test]
fn sci_scenario_process_postfixe() {
    let t = process("3 4 + 5 *").unwrap();
    assert!(t.est_postfixe);
    assert_eq!(t.convertie, "(3+4)*5");
    assert_eq!(t.valeur, 35.0);
}

#[test]
fn sci_scenario_process_infixe() {
    let t = process("(45+60)*cos(30)").unwrap();
    assert!(!t.est_postfixe);
    assert_eq!(t.convertie, "45 60 + 30 cos *");
    assert!((t.valeur - 90.932667397).abs() < 1e-6, "v={}", t.valeur);
    assert_eq!(t.demarche.notation, "infixe");
}

#[test]
fn sci_nombre_seul() {
    let t = process("42").unwrap();
    assert!(t.est_postfixe);
    assert_eq!(t.convertie, "42");
    assert_eq!(t.valeur, 42.0);

    assert_eq!(convert_infix_to_postfix("42").unwrap(), "42");
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn sci_erreurs() {
    assert_eq!(evaluate_postfix("5 0 /"), Err(ErreurCalc::DivisionByZero));
    assert_eq!(evaluate_postfix("5 0 %"), Err(ErreurCalc::DivisionByZero));
    assert!(matches!(evaluate_postfix("-1 raiz"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(evaluate_postfix("0 log"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(evaluate_postfix("90 tan"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(evaluate_postfix("-90 tan"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(evaluate_postfix("270 tg"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(evaluate_postfix("10 400 ^"), Err(ErreurCalc::DomainError(_))));
    assert!(matches!(
        evaluate_postfix("3 4 + +"),
        Err(ErreurCalc::StackUnderflow { attendus: 2, .. })
    ));
    assert!(matches!(
        evaluate_postfix("cos"),
        Err(ErreurCalc::StackUnderflow { attendus: 1, .. })
    ));
    assert_eq!(
        evaluate_postfix("3 4"),
        Err(ErreurCalc::ArityMismatch { restants: 2 })
    );
    assert_eq!(evaluate_postfix(""), Err(ErreurCalc::ArityMismatch { restants: 0 }));
    assert_eq!(
        convert_infix_to_postfix("(3+4"),
        Err(ErreurCalc::UnbalancedParentheses)
    );
    assert_eq!(
        convert_infix_to_postfix("3+4)"),
        Err(ErreurCalc::UnbalancedParentheses)
    );
    assert!(matches!(
        convert_postfix_to_infix("3 +"),
        Err(ErreurCalc::StackUnderflow { .. })
    ));

    // pas de parenthèses en postfixe
    assert_eq!(
        evaluate_postfix("3 ( 4 +"),
        Err(ErreurCalc::UnknownToken("(".into()))
    );
    assert_eq!(
        convert_postfix_to_infix("3 4 ) +"),
        Err(ErreurCalc::UnknownToken(")".into()))
    );

    // infixe sans valeur
    assert_eq!(
        convert_infix_to_postfix(""),
        Err(ErreurCalc::ArityMismatch { restants: 0 })
    );
    assert_eq!(
        convert_infix_to_postfix("()"),
        Err(ErreurCalc::ArityMismatch { restants: 0 })
    );
    // négation sans opérande
    assert!(matches!(
        convert_infix_to_postfix("3*-").and_then(|p| evaluate_postfix(&p)),
        Err(ErreurCalc::StackUnderflow { .. })
    ));
}

#[test]
fn sci_process_atomique() {
    // conversion possible, évaluation impossible => erreur, pas de sortie partielle
    assert_eq!(process("1/(2-2)").map(|t| t.valeur), Err(ErreurCalc::DivisionByZero));
    assert!(matches!(process("(1+2"), Err(ErreurCalc::UnbalancedParentheses)));
    assert!(matches!(process("3 0 %"), Err(ErreurCalc::DivisionByZero)));
}

/* ------------------------ Batterie de démonstration ------------------------ */

#[test]
fn sci_batterie_demonstration() {
    // (postfixe, infixe équivalente, valeur)
    let cas: [(&str, &str, f64); 9] = [
        ("3 4 + 5 *", "(3 + 4) * 5", 35.0),
        ("7 2 * 4 +", "7 * 2 + 4", 18.0),
        ("8 5 2 4 + * +", "8 + (5 * (2 + 4))", 38.0),
        ("6 2 / 3 + 4 *", "(6 / 2 + 3) * 4", 24.0),
        ("9 5 2 8 * 4 + * +", "9 + (5 * (2 * 8 + 4))", 109.0),
        ("2 3 + log 5 /", "log(2 + 3) / 5", 0.13979400086720376),
        ("10 log 3 ^ 2 +", "(log(10)) ^ 3 + 2", 3.0),
        ("45 60 + 30 cos *", "(45 + 60) * cos(30)", 90.93266739736606),
        ("0.5 45 sen 2 ^ +", "sen(45) ^ 2 + 0.5", 1.0),
    ];

    let t0 = Instant::now();
    for (postfixe, infixe, attendu) in cas {
        budget(t0, Duration::from_millis(200));

        let p = process(postfixe).unwrap_or_else(|e| panic!("{postfixe:?}: {e}"));
        assert!(p.est_postfixe, "{postfixe:?}");
        assert!(proche(p.valeur, attendu), "{postfixe:?} v={}", p.valeur);

        let i = process(infixe).unwrap_or_else(|e| panic!("{infixe:?}: {e}"));
        assert!(!i.est_postfixe, "{infixe:?}");
        assert!(proche(i.valeur, attendu), "{infixe:?} v={}", i.valeur);

        // la forme postfixe canonique de l’infixe relit la même valeur
        assert_valeur(&i.convertie, attendu);
        // l’infixe reconstruite aussi
        assert!(proche(valeur_infixe(&p.convertie), attendu), "{}", p.convertie);
    }
}

/* ------------------------ Pas de capacité fixe ------------------------ */

#[test]
fn sci_longue_expression_sans_troncature() {
    let t0 = Instant::now();

    // 5000 termes : 1 1 + 1 + ... (aucune limite de taille)
    let mut s = String::from("1");
    for _ in 1..5000 {
        s.push_str(" 1 +");
    }
    assert_valeur(&s, 5000.0);
    budget(t0, Duration::from_millis(500));

    // imbrication profonde de parenthèses
    let infixe = format!("{}1{}", "(".repeat(2000), "+1)".repeat(2000));
    assert!(proche(valeur_infixe(&infixe), 2001.0));
    budget(t0, Duration::from_millis(1000));
}
