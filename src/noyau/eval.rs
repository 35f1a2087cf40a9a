//! Noyau — évaluation (pipeline réel)
//!
//! nettoyage -> validation -> jetons -> parenthèses (récursif) -> * / -> + - -> valeur
//!
//! Réduction "en place" : la liste de jetons de travail est consommée,
//! chaque fenêtre `a op b` est remplacée par son résultat.
//! Aucun arrondi ici : c’est l’appelant qui arrondit (voir format.rs).

use log::debug;
use thiserror::Error;

use super::jetons::{format_jetons, tokenize, Jeton};

/// Échecs possibles de l’évaluateur. Tous récupérables par l’appelant.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ErreurEvaluation {
    #[error("Invalid characters")]
    CaracteresInvalides,

    #[error("Invalid number")]
    NombreInvalide,

    #[error("Mismatched parentheses")]
    ParenthesesDesequilibrees,

    #[error("Division by zero")]
    DivisionParZero,

    #[error("Invalid expression")]
    ExpressionInvalide,
}

/// API publique : évalue une expression arithmétique restreinte.
///
/// - entrée vide (ou seulement des espaces) => 0
/// - priorité : parenthèses, puis * /, puis + - (gauche à droite)
/// - pas de moins unaire : "-5" est une expression invalide
/// - un littéral hors f64 est refusé (NombreInvalide) ; un dépassement en cours
///   de calcul donne une valeur infinie, que l’appelant refuse à l’arrondi
pub fn evaluate(expression: &str) -> Result<f64, ErreurEvaluation> {
    let mut jetons = tokenize(expression)?;

    if jetons.is_empty() {
        return Ok(0.0);
    }

    debug!("évaluation: [{}]", format_jetons(&jetons));

    reduire_parentheses(&mut jetons)?;
    reduire_plat(jetons)
}

/// Remplace chaque groupe parenthésé (le plus interne à gauche d’abord)
/// par un unique jeton Nombre.
fn reduire_parentheses(jetons: &mut Vec<Jeton>) -> Result<(), ErreurEvaluation> {
    while jetons
        .iter()
        .any(|j| matches!(j, Jeton::ParOuv | Jeton::ParFerm))
    {
        let mut ouv: Option<usize> = None;
        let mut paire: Option<(usize, usize)> = None;

        for (i, j) in jetons.iter().enumerate() {
            match j {
                Jeton::ParOuv => ouv = Some(i),
                Jeton::ParFerm => match ouv {
                    Some(o) => {
                        paire = Some((o, i));
                        break;
                    }
                    // ')' sans '(' ouvrante avant
                    None => return Err(ErreurEvaluation::ParenthesesDesequilibrees),
                },
                _ => {}
            }
        }

        let (o, f) = paire.ok_or(ErreurEvaluation::ParenthesesDesequilibrees)?;

        // (o, f) est la paire la plus interne : l’intérieur est plat
        let interieur: Vec<Jeton> = jetons[o + 1..f].to_vec();
        let v = reduire_plat(interieur)?;

        jetons.splice(o..=f, std::iter::once(Jeton::Nombre(v)));
    }

    Ok(())
}

/// Réduit une liste SANS parenthèses : d’abord * /, puis + -.
fn reduire_plat(mut jetons: Vec<Jeton>) -> Result<f64, ErreurEvaluation> {
    reduire_passe(&mut jetons, |op, a, b| match op {
        Jeton::Fois => Some(Ok(a * b)),
        Jeton::Divise => {
            // 0/0 et x/0 : même échec, quel que soit x
            if b == 0.0 {
                Some(Err(ErreurEvaluation::DivisionParZero))
            } else {
                Some(Ok(a / b))
            }
        }
        _ => None,
    })?;

    reduire_passe(&mut jetons, |op, a, b| match op {
        Jeton::Plus => Some(Ok(a + b)),
        Jeton::Moins => Some(Ok(a - b)),
        _ => None,
    })?;

    match jetons.as_slice() {
        [Jeton::Nombre(v)] => Ok(*v),
        _ => Err(ErreurEvaluation::ExpressionInvalide),
    }
}

/// Une passe gauche -> droite aux positions impaires (positions d’opérateurs
/// dans la disposition nombre/op/nombre).
///
/// `applique` renvoie None si l’opérateur n’appartient pas à cette passe.
/// Après un remplacement, la fenêtre a rétréci de 2 : on reste sur le même indice.
fn reduire_passe<F>(jetons: &mut Vec<Jeton>, applique: F) -> Result<(), ErreurEvaluation>
where
    F: Fn(Jeton, f64, f64) -> Option<Result<f64, ErreurEvaluation>>,
{
    let mut i: usize = 1;

    while i < jetons.len() {
        let op = jetons[i];
        if !op.est_operateur() {
            i += 2;
            continue;
        }

        let a = jetons[i - 1].nombre();
        let b = jetons.get(i + 1).and_then(Jeton::nombre);

        // On regarde d’abord si l’opérateur est pour cette passe
        // (sinon "2+" doit rester intact jusqu’à la passe + -).
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                if applique(op, 0.0, 1.0).is_some() {
                    return Err(ErreurEvaluation::ExpressionInvalide);
                }
                i += 2;
                continue;
            }
        };

        match applique(op, a, b) {
            Some(r) => {
                let v = r?;
                jetons.splice(i - 1..=i + 1, std::iter::once(Jeton::Nombre(v)));
            }
            None => i += 2,
        }
    }

    Ok(())
}
