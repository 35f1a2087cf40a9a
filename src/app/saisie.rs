//! src/app/saisie.rs
//!
//! Saisie d’un total de sandwichs : champ "simple" OU ventilation par catégorie.
//!
//! Contrats :
//! - Les deux modes ne sont jamais actifs ensemble : écrire dans l’un vide l’autre.
//! - En mode détaillé, le total soumis est la somme des catégories (jamais recopié à la main).
//! - Le mode est DÉRIVÉ des champs (pas de drapeau séparé qui pourrait diverger).

use log::{debug, warn};

use crate::noyau::format::format_resultat;
use crate::noyau::{compte_depuis_texte, validate, EntreeVentilation, ResultatValidation};

use super::soumission::{LigneVentilation, ModeTotal, SoumissionGroupe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSaisie {
    Vide,
    Simple,
    Detaille,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChampVentilation {
    pub categorie: String,
    pub texte: String,
}

fn champs_vides(categories: &[String]) -> Vec<ChampVentilation> {
    categories
        .iter()
        .map(|c| ChampVentilation {
            categorie: c.clone(),
            texte: String::new(),
        })
        .collect()
}

fn vers_entrees(champs: &[ChampVentilation]) -> Vec<EntreeVentilation> {
    champs
        .iter()
        .map(|c| EntreeVentilation::new(c.categorie.clone(), compte_depuis_texte(&c.texte)))
        .collect()
}

/// Lignes non nulles seulement (ce qui part vers l’API).
fn lignes_non_nulles(entrees: &[EntreeVentilation]) -> Vec<LigneVentilation> {
    entrees
        .iter()
        .filter(|e| e.compte > 0)
        .map(LigneVentilation::from)
        .collect()
}

/// Texte saisi mais pas un entier positif ou nul ("2.5", "abc", "-5").
fn compte_illisible(texte: &str) -> bool {
    let t = texte.trim();
    !t.is_empty() && t.parse::<u64>().is_err()
}

/* ------------------------ Widget total (simple | détaillé) ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaisieTotal {
    pub simple: String,
    pub ventilation: Vec<ChampVentilation>,
}

impl SaisieTotal {
    pub fn new(categories: &[String]) -> Self {
        Self {
            simple: String::new(),
            ventilation: champs_vides(categories),
        }
    }

    pub fn mode(&self) -> ModeSaisie {
        if self.ventilation.iter().any(|c| !c.texte.trim().is_empty()) {
            ModeSaisie::Detaille
        } else if !self.simple.trim().is_empty() {
            ModeSaisie::Simple
        } else {
            ModeSaisie::Vide
        }
    }

    /// Frappe dans le champ simple : vide toute la ventilation (si texte non vide).
    pub fn saisir_simple(&mut self, texte: impl Into<String>) {
        self.simple = texte.into();

        if !self.simple.trim().is_empty() {
            if self.mode() == ModeSaisie::Detaille {
                debug!("saisie simple: ventilation effacée");
            }
            for c in &mut self.ventilation {
                c.texte.clear();
            }
        }
    }

    /// Frappe dans une catégorie : vide le champ simple (si texte non vide).
    pub fn saisir_ventilation(&mut self, index: usize, texte: impl Into<String>) {
        let n = self.ventilation.len();
        let Some(champ) = self.ventilation.get_mut(index) else {
            warn!("ventilation: index {index} hors bornes ({n} catégories)");
            return;
        };

        champ.texte = texte.into();

        if !champ.texte.trim().is_empty() && !self.simple.is_empty() {
            debug!("saisie ventilation: total simple effacé");
            self.simple.clear();
        }
    }

    /// "Utiliser le résultat" de la calculatrice : même effet qu’une frappe dans le champ simple.
    /// Renvoie false (sans rien toucher) si la valeur n’est pas affichable.
    pub fn appliquer_calculatrice(&mut self, valeur: f64, decimales: u32) -> bool {
        match format_resultat(valeur, decimales) {
            Some(texte) => {
                self.saisir_simple(texte);
                true
            }
            None => false,
        }
    }

    pub fn entrees(&self) -> Vec<EntreeVentilation> {
        vers_entrees(&self.ventilation)
    }

    /// Total dérivé : somme des catégories en mode détaillé.
    pub fn total(&self) -> u64 {
        match self.mode() {
            ModeSaisie::Vide => 0,
            ModeSaisie::Simple => compte_depuis_texte(&self.simple),
            ModeSaisie::Detaille => self
                .entrees()
                .iter()
                .fold(0u64, |acc, e| acc.saturating_add(e.compte)),
        }
    }

    pub fn validation(&self, libelle_categorie: &str, libelle_total: &str) -> ResultatValidation {
        validate(&self.entrees(), self.total(), libelle_categorie, libelle_total)
    }

    /// Champ simple rempli mais illisible comme nombre de sandwichs (compterait pour 0).
    pub fn simple_invalide(&self) -> bool {
        self.mode() == ModeSaisie::Simple && compte_illisible(&self.simple)
    }

    pub fn vers_mode_total(&self) -> ModeTotal {
        match self.mode() {
            ModeSaisie::Detaille => ModeTotal::Detaille {
                total: self.total(),
                ventilation: lignes_non_nulles(&self.entrees()),
            },
            ModeSaisie::Simple | ModeSaisie::Vide => ModeTotal::Simple {
                total: self.total(),
            },
        }
    }

    pub fn effacer(&mut self) {
        self.simple.clear();
        for c in &mut self.ventilation {
            c.texte.clear();
        }
    }
}

/* ------------------------ Groupe (total déclaré + ventilation vérifiée) ------------------------ */

/// Un groupe déclare son total ; sa ventilation (optionnelle) doit y correspondre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaisieGroupe {
    pub nom: String,
    pub total: String,
    pub ventilation: Vec<ChampVentilation>,
}

impl SaisieGroupe {
    pub fn new(categories: &[String]) -> Self {
        Self {
            nom: String::new(),
            total: String::new(),
            ventilation: champs_vides(categories),
        }
    }

    pub fn total_declare(&self) -> u64 {
        compte_depuis_texte(&self.total)
    }

    pub fn entrees(&self) -> Vec<EntreeVentilation> {
        vers_entrees(&self.ventilation)
    }

    pub fn validation(&self, libelle_categorie: &str, libelle_total: &str) -> ResultatValidation {
        validate(&self.entrees(), self.total_declare(), libelle_categorie, libelle_total)
    }

    pub fn total_invalide(&self) -> bool {
        compte_illisible(&self.total)
    }

    /// Groupe sans nom ni nombre : ignoré à la soumission.
    pub fn est_vide(&self) -> bool {
        self.nom.trim().is_empty() && self.total_declare() == 0 && !self.total_invalide()
    }

    pub fn vers_soumission(&self) -> SoumissionGroupe {
        SoumissionGroupe {
            nom: self.nom.trim().to_string(),
            total: self.total_declare(),
            ventilation: lignes_non_nulles(&self.entrees()),
        }
    }
}
