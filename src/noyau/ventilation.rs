//! Ventilation (breakdown) : cohérence somme des catégories / total déclaré.
//!
//! Contrats :
//! - Fonction pure, jamais d’erreur : un écart est une DONNÉE (valide=false + message).
//! - Ventilation "non saisie" (tout à 0) => valide, message absent.
//!   L’activation dépend des valeurs seulement, jamais d’une case à cocher.

/// Une catégorie nommée ("Deli", "Turkey", ...) avec son compte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeVentilation {
    pub libelle: String,
    pub compte: u64,
}

impl EntreeVentilation {
    pub fn new(libelle: impl Into<String>, compte: u64) -> Self {
        Self {
            libelle: libelle.into(),
            compte,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatValidation {
    pub valide: bool,
    pub somme: u64,
    pub message: Option<String>,
}

impl ResultatValidation {
    /// Un message présent bloque la soumission.
    pub fn bloquant(&self) -> bool {
        self.message.is_some()
    }
}

/// Texte saisi -> compte. Vide, négatif, décimal, n’importe quoi => 0.
pub fn compte_depuis_texte(texte: &str) -> u64 {
    texte.trim().parse::<u64>().unwrap_or(0)
}

/// Valide une ventilation contre un total attendu.
///
/// Message (déterministe) :
/// `"<categorie> breakdown (<somme>) must equal <libelle_total> (<total_attendu>)"`
pub fn validate(
    entrees: &[EntreeVentilation],
    total_attendu: u64,
    libelle_categorie: &str,
    libelle_total: &str,
) -> ResultatValidation {
    if entrees.iter().all(|e| e.compte == 0) {
        return ResultatValidation {
            valide: true,
            somme: 0,
            message: None,
        };
    }

    let somme = entrees
        .iter()
        .fold(0u64, |acc, e| acc.saturating_add(e.compte));

    if somme != total_attendu {
        return ResultatValidation {
            valide: false,
            somme,
            message: Some(format!(
                "{libelle_categorie} breakdown ({somme}) must equal {libelle_total} ({total_attendu})"
            )),
        };
    }

    ResultatValidation {
        valide: true,
        somme,
        message: None,
    }
}
