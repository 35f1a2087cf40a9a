//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l’évaluateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : expression totalement parenthésée => même valeur que
//!   le calcul de référence (même ordre d’opérations, donc égalité exacte)

use std::time::{Duration, Instant};

use super::eval::{evaluate, ErreurEvaluation};
use super::ventilation::{validate, EntreeVentilation};

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_espace(rng: &mut Rng) -> &'static str {
    match rng.pick(6) {
        0 => " ",
        1 => "\t",
        _ => "",
    }
}

/// Atome : entier 0..9 ou décimal "a.5". Renvoie (texte, valeur).
fn gen_atom(rng: &mut Rng) -> (String, f64) {
    let a = rng.pick(10);
    if rng.pick(4) == 0 {
        (format!("{a}.5"), a as f64 + 0.5)
    } else {
        (format!("{a}"), a as f64)
    }
}

/// Expression totalement parenthésée + valeur de référence.
/// None = une division par zéro apparaît quelque part.
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Option<f64>) {
    if depth == 0 || rng.pick(4) == 0 {
        let (s, v) = gen_atom(rng);
        return (s, Some(v));
    }

    let (sa, va) = gen_expr(rng, depth - 1);
    let (sb, vb) = gen_expr(rng, depth - 1);

    let (op, v) = match rng.pick(4) {
        0 => ('+', va.zip(vb).map(|(a, b)| a + b)),
        1 => ('-', va.zip(vb).map(|(a, b)| a - b)),
        2 => ('*', va.zip(vb).map(|(a, b)| a * b)),
        _ => (
            '/',
            va.zip(vb).and_then(|(a, b)| if b == 0.0 { None } else { Some(a / b) }),
        ),
    };

    let e1 = gen_espace(rng);
    let e2 = gen_espace(rng);
    (format!("({sa}{e1}{op}{e2}{sb})"), v)
}

/// Chaîne quelconque sur un alphabet proche du domaine (+ intrus).
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '5', '9', '.', '+', '-', '*', '/', '(', ')', ' ', 'x', '%',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    // arbre binaire équilibré : profondeur ~log2(n), pas n
    let mut niveau: Vec<String> = vec![terme.to_string(); n];
    while niveau.len() > 1 {
        niveau = niveau
            .chunks(2)
            .map(|p| match p {
                [a, b] => format!("({a}+{b})"),
                [a] => a.clone(),
                _ => String::new(),
            })
            .collect();
    }
    niveau.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_reference_exacte() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_div0 = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        match (evaluate(&expr), attendu) {
            (Ok(v), Some(a)) => {
                assert_eq!(v.to_bits(), a.to_bits(), "expr={expr:?} v={v} attendu={a}");
                seen_ok += 1;
            }
            (Err(ErreurEvaluation::DivisionParZero), None) => seen_div0 += 1,
            (r, a) => panic!("expr={expr:?} obtenu={r:?} attendu={a:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_div0 > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let len = rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, len);

        let r1 = evaluate(&s);
        let r2 = evaluate(&s);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "s={s:?}"),
            _ => assert_eq!(r1, r2, "s={s:?}"),
        }

        if s.contains('x') || s.contains('%') {
            assert_eq!(r1, Err(ErreurEvaluation::CaracteresInvalides), "s={s:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_ventilation_coherente() {
    let mut rng = Rng::new(0x5A_u64);

    for _ in 0..200 {
        let n = 1 + rng.pick(6) as usize;
        let entrees: Vec<EntreeVentilation> = (0..n)
            .map(|i| EntreeVentilation::new(format!("c{i}"), rng.pick(50) as u64))
            .collect();
        let somme: u64 = entrees.iter().map(|e| e.compte).sum();
        let total = if rng.coin() { somme } else { rng.pick(200) as u64 };

        let r = validate(&entrees, total, "Group type", "group total");

        if somme == 0 {
            assert!(r.valide && r.message.is_none());
        } else {
            assert_eq!(r.somme, somme);
            assert_eq!(r.valide, somme == total);
            assert_eq!(r.message.is_some(), somme != total);
        }
    }
}
