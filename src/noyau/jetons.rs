// src/noyau/jetons.rs
//
// Tokenisation stricte : chiffres, '.', + - * / ( ) seulement.
// Les espaces sont retirés AVANT la validation du jeu de caractères.

use super::eval::ErreurEvaluation;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),

    Plus,
    Moins,
    Fois,
    Divise,

    ParOuv,
    ParFerm,
}

impl Jeton {
    /// Opérateur binaire (+ - * /) ?
    pub fn est_operateur(&self) -> bool {
        matches!(self, Jeton::Plus | Jeton::Moins | Jeton::Fois | Jeton::Divise)
    }

    pub fn nombre(&self) -> Option<f64> {
        match self {
            Jeton::Nombre(v) => Some(*v),
            _ => None,
        }
    }
}

fn est_caractere_autorise(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Vide le tampon numérique courant (s’il y en a un) dans `out`.
fn vider_nombre(tampon: &mut String, out: &mut Vec<Jeton>) -> Result<(), ErreurEvaluation> {
    if tampon.is_empty() {
        return Ok(());
    }

    // "1.2.3" ou "." : refus (parse échoue) ; "5." et ".5" : acceptés
    let v: f64 = tampon
        .parse()
        .map_err(|_| ErreurEvaluation::NombreInvalide)?;
    if !v.is_finite() {
        return Err(ErreurEvaluation::NombreInvalide);
    }

    out.push(Jeton::Nombre(v));
    tampon.clear();
    Ok(())
}

/// Tokenize une expression arithmétique restreinte.
///
/// 1) retire tous les espaces
/// 2) valide le jeu de caractères en une passe (échec immédiat)
/// 3) accumule chiffres/points, pousse opérateurs et parenthèses
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurEvaluation> {
    let nettoye: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    if !nettoye.chars().all(est_caractere_autorise) {
        return Err(ErreurEvaluation::CaracteresInvalides);
    }

    let mut out = Vec::with_capacity(nettoye.len());
    let mut tampon = String::new();

    for c in nettoye.chars() {
        if c.is_ascii_digit() || c == '.' {
            tampon.push(c);
            continue;
        }

        vider_nombre(&mut tampon, &mut out)?;

        let j = match c {
            '+' => Jeton::Plus,
            '-' => Jeton::Moins,
            '*' => Jeton::Fois,
            '/' => Jeton::Divise,
            '(' => Jeton::ParOuv,
            ')' => Jeton::ParFerm,
            // déjà filtré plus haut
            _ => return Err(ErreurEvaluation::CaracteresInvalides),
        };
        out.push(j);
    }

    vider_nombre(&mut tampon, &mut out)?;

    Ok(out)
}

/// Format utilitaire (journal/debug) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for j in jetons {
        let s = match j {
            Jeton::Nombre(v) => format!("{v}"),
            Jeton::Plus => "+".to_string(),
            Jeton::Moins => "-".to_string(),
            Jeton::Fois => "*".to_string(),
            Jeton::Divise => "/".to_string(),
            Jeton::ParOuv => "(".to_string(),
            Jeton::ParFerm => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn espaces_retires_avant_validation() {
        let j = tokenize(" 12 +\t3 ").unwrap();
        assert_eq!(j, vec![Jeton::Nombre(12.0), Jeton::Plus, Jeton::Nombre(3.0)]);
    }

    #[test]
    fn chiffres_separes_par_espace_fusionnent() {
        // les espaces disparaissent d’abord : "1 2" == "12"
        assert_eq!(tokenize("1 2").unwrap(), vec![Jeton::Nombre(12.0)]);
    }

    #[test]
    fn caractere_interdit() {
        assert_eq!(tokenize("2+a"), Err(ErreurEvaluation::CaracteresInvalides));
        assert_eq!(tokenize("2^3"), Err(ErreurEvaluation::CaracteresInvalides));
        assert_eq!(tokenize("1,5"), Err(ErreurEvaluation::CaracteresInvalides));
    }

    #[test]
    fn caractere_interdit_prioritaire_sur_nombre_invalide() {
        // validation globale AVANT la tokenisation
        assert_eq!(tokenize("1..2+x"), Err(ErreurEvaluation::CaracteresInvalides));
    }

    #[test]
    fn decimaux() {
        assert_eq!(tokenize("5.").unwrap(), vec![Jeton::Nombre(5.0)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Jeton::Nombre(0.5)]);
        assert_eq!(tokenize("1.2.3"), Err(ErreurEvaluation::NombreInvalide));
        assert_eq!(tokenize("."), Err(ErreurEvaluation::NombreInvalide));
    }

    #[test]
    fn litteral_non_fini() {
        // parse::<f64> donne inf sans erreur
        assert_eq!(tokenize(&"9".repeat(400)), Err(ErreurEvaluation::NombreInvalide));
        assert!(tokenize(&"9".repeat(300)).is_ok());
    }

    #[test]
    fn parentheses_et_format() {
        let j = tokenize("(1+2)*3").unwrap();
        assert_eq!(format_jetons(&j), "( 1 + 2 ) * 3");
    }

    #[test]
    fn vide() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
