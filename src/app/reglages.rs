//! src/app/reglages.rs
//!
//! Réglages du formulaire de collecte (valeurs par défaut + garde-fous).
//! Pas de fichier de configuration : tout part de `Default`, comme l’état UI.

use crate::noyau::format::DECIMALES_MAX;

/// Précision d’arrondi par défaut (résultat de calculatrice).
const DECIMALES_DEFAUT: u32 = 2;

/// Catégories de sandwichs proposées dans une ventilation.
const CATEGORIES_DEFAUT: [&str; 5] = ["Deli", "Turkey", "Ham", "PBJ", "Other"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub categories: Vec<String>,
    pub decimales: u32,

    // libellés des messages de ventilation
    pub libelle_individuel: String,
    pub libelle_total_individuel: String,
    pub libelle_groupe: String,
    pub libelle_total_groupe: String,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            categories: CATEGORIES_DEFAUT.iter().map(|c| c.to_string()).collect(),
            decimales: DECIMALES_DEFAUT,
            libelle_individuel: "Individual sandwich".into(),
            libelle_total_individuel: "individual total".into(),
            libelle_groupe: "Group type".into(),
            libelle_total_groupe: "group total".into(),
        }
    }
}

impl Reglages {
    /// Garde-fou : limite la précision (même borne que le noyau).
    pub fn set_decimales(&mut self, decimales: u32) {
        self.decimales = decimales.min(DECIMALES_MAX);
    }
}
