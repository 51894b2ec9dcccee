//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - seules erreurs admises sur entrée bien formée : domaine (sqrt d’un négatif)
//! - invariant clé : valeur finie => son affichage se relit à l’identique

use std::time::{Duration, Instant};

use super::erreur::{CategorieErreur, ErreurCalcul};
use super::eval_expression;
use super::fonctions::Fonction;
use super::format::format_resultat;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        // inclut 0 : utile pour les formes indéterminées
        _ => format!("{}", rng.pick(8)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(10) {
        0 => gen_atome(rng),
        1 => format!("{a}+{}", gen_expr(rng, depth - 1)),
        2 => format!("{a}-{}", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("{a}/{}", gen_expr(rng, depth - 1)),
        5 => format!("{a}%{}", gen_expr(rng, depth - 1)),
        6 => format!("{a}^{}", gen_atome(rng)),
        7 => format!("-{a}"),
        8 => format!("({a})"),
        _ => {
            let f = Fonction::TOUTES[rng.pick(Fonction::TOUTES.len() as u32) as usize];
            format!("{}({a})", f.nom())
        }
    }
}

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', '+', '-', '*', '/', '%', '^', '(', ')', ' ', 'p', 'i', 'e', 's', 'n',
        'q', 'r', 't', '|', '$', 'π', 'é',
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn memes_bits(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr) {
            Ok(ev) => {
                // déterminisme : même entrée => même valeur, mêmes avertissements
                let encore = eval_expression(&expr).unwrap();
                assert!(memes_bits(ev.valeur, encore.valeur), "expr={expr:?}");
                assert_eq!(ev.avertissements.len(), encore.avertissements.len());

                if ev.valeur.is_finite() {
                    let texte = format_resultat(ev.valeur);
                    let relu = eval_expression(&texte)
                        .unwrap_or_else(|e| panic!("relecture {texte:?}: {e}"))
                        .valeur;
                    assert_eq!(relu, ev.valeur, "expr={expr:?} texte={texte:?}");
                }
                seen_ok += 1;
            }
            Err(e) => {
                assert_eq!(
                    e.categorie(),
                    CategorieErreur::Domaine,
                    "erreur non attendue: expr={expr:?} err={e}"
                );
            }
        }
    }

    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for k in 0..300 {
        budget(t0, max);

        let s = gen_bruit(&mut rng, 1 + k % 24);
        match eval_expression(&s) {
            Ok(_) => {}
            Err(e) => {
                // message toujours non vide, jamais de panique
                assert!(!e.to_string().is_empty(), "entrée={s:?}");
            }
        }
    }
}

#[test]
fn fuzz_safe_caracteres_hors_ascii() {
    for s in ["π", "2 × 3", "é", "１"] {
        let err = eval_expression(s).unwrap_err();
        assert!(
            matches!(err, ErreurCalcul::Lexicale(_)),
            "entrée={s:?} err={err}"
        );
    }
}

#[test]
fn fuzz_safe_imbrication_profonde_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = eval_expression(&expr).unwrap_err();
    assert!(matches!(err, ErreurCalcul::TropImbrique { .. }));

    let expr = format!("{}1", "sin(".repeat(5_000));
    let err = eval_expression(&expr).unwrap_err();
    assert!(matches!(err, ErreurCalcul::TropImbrique { .. }));

    budget(t0, max);
}
