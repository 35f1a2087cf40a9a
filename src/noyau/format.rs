// src/noyau/format.rs
//
// Arrondi côté appelant (l’évaluateur ne tronque/arrondit jamais).
// On passe par la valeur binaire EXACTE du f64 (BigRational) :
// arrondi "demi vers l’extérieur" sans dépendre de x*100 en flottant.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/// Garde-fou : précision d’affichage bornée.
pub const DECIMALES_MAX: u32 = 12;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Convertit un entier “scalé” (×10^decimales) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, decimales: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(decimales);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if decimales == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < decimales as usize {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// x -> entier scalé arrondi = round(x * 10^decimales). None si non fini.
fn arrondi_scale(x: f64, decimales: u32) -> Option<BigInt> {
    if !x.is_finite() {
        return None;
    }
    let r = BigRational::from_float(x)?;
    let scale = BigRational::from_integer(pow10(decimales));
    Some((r * scale).round().to_integer())
}

/// Texte décimal arrondi à `decimales` chiffres (zéros finaux conservés).
pub fn format_fixe(x: f64, decimales: u32) -> Option<String> {
    let d = decimales.min(DECIMALES_MAX);
    arrondi_scale(x, d).map(|s| scaled_to_decimal(s, d))
}

/// Texte "propre" pour un champ de saisie : 95.00 -> "95", 0.30 -> "0.3".
pub fn format_resultat(x: f64, decimales: u32) -> Option<String> {
    let mut s = format_fixe(x, decimales)?;

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    Some(s)
}

/// Arrondi numérique (ex: total de calculatrice avant affichage).
pub fn arrondir(x: f64, decimales: u32) -> Option<f64> {
    format_fixe(x, decimales)?.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrondi_flottant_classique() {
        assert_eq!(arrondir(0.1 + 0.2, 2), Some(0.3));
        assert_eq!(format_resultat(0.1 + 0.2, 2).as_deref(), Some("0.3"));
    }

    #[test]
    fn entier_sans_decimales() {
        assert_eq!(format_resultat(95.0, 2).as_deref(), Some("95"));
        assert_eq!(format_fixe(95.0, 2).as_deref(), Some("95.00"));
    }

    #[test]
    fn demi_vers_l_exterieur() {
        assert_eq!(format_fixe(2.5, 0).as_deref(), Some("3"));
        assert_eq!(format_fixe(-2.5, 0).as_deref(), Some("-3"));
        assert_eq!(format_fixe(0.125, 2).as_deref(), Some("0.13"));
    }

    #[test]
    fn negatifs() {
        assert_eq!(format_resultat(-12.5, 2).as_deref(), Some("-12.5"));
        assert_eq!(format_resultat(-0.001, 2).as_deref(), Some("0"));
        assert_eq!(format_fixe(-0.05, 2).as_deref(), Some("-0.05"));
    }

    #[test]
    fn non_fini() {
        assert_eq!(arrondir(f64::INFINITY, 2), None);
        assert_eq!(format_resultat(f64::NAN, 2), None);
    }

    #[test]
    fn precision_bornee() {
        let s = format_fixe(1.0 / 3.0, 50).unwrap();
        assert_eq!(s.split('.').nth(1).map(str::len), Some(DECIMALES_MAX as usize));
    }

    #[test]
    fn tiers() {
        assert_eq!(format_resultat(1.0 / 3.0, 2).as_deref(), Some("0.33"));
        assert_eq!(format_resultat(2.0 / 3.0, 2).as_deref(), Some("0.67"));
    }
}
