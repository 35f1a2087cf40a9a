//! src/app/etat.rs
//!
//! État du formulaire de collecte (sans vue).
//!
//! Rôle : assembler les saisies (individuel + groupes), la calculatrice modale
//! et la décision de soumission, sans aucune logique d’affichage.
//!
//! Contrats :
//! - Validation recalculée à chaque appel (pure, pas de cache à invalider).
//! - Un message de ventilation bloque la soumission ; une ventilation vide jamais.

use log::{info, warn};

use crate::noyau::format::format_resultat;

use super::calculatrice::Calculatrice;
use super::reglages::Reglages;
use super::saisie::{SaisieGroupe, SaisieTotal};
use super::soumission::Soumission;

/// Champ qui recevra le résultat de la calculatrice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cible {
    Individuel,
    Groupe(usize),
}

#[derive(Clone, Debug)]
pub struct FormulaireCollecte {
    // --- saisie ---
    pub site: String,
    pub individuel: SaisieTotal,
    pub groupes: Vec<SaisieGroupe>,

    // --- modale ---
    pub calculatrice: Option<(Cible, Calculatrice)>,

    // --- sorties ---
    pub erreurs: Vec<String>,
    pub dernier_envoi: Option<Soumission>,

    // --- paramètres ---
    pub reglages: Reglages,
}

impl Default for FormulaireCollecte {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default())
    }
}

impl FormulaireCollecte {
    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            site: String::new(),
            individuel: SaisieTotal::new(&reglages.categories),
            groupes: Vec::new(),
            calculatrice: None,
            erreurs: Vec::new(),
            dernier_envoi: None,
            reglages,
        }
    }

    /* ------------------------ Groupes ------------------------ */

    pub fn ajouter_groupe(&mut self) {
        self.groupes.push(SaisieGroupe::new(&self.reglages.categories));
    }

    pub fn retirer_groupe(&mut self, index: usize) {
        if index < self.groupes.len() {
            self.groupes.remove(index);
        }
        // la modale pointait peut-être sur ce groupe
        if let Some((Cible::Groupe(_), _)) = &self.calculatrice {
            self.calculatrice = None;
        }
    }

    /* ------------------------ Calculatrice ------------------------ */

    pub fn ouvrir_calculatrice(&mut self, cible: Cible) {
        self.calculatrice = Some((cible, Calculatrice::default()));
    }

    pub fn fermer_calculatrice(&mut self) {
        self.calculatrice = None;
    }

    /// "Utiliser le résultat" : écrit dans la cible puis ferme la modale.
    /// Sans résultat valide, la modale reste ouverte et rien ne change.
    pub fn utiliser_resultat(&mut self) -> bool {
        let Some((cible, calc)) = &self.calculatrice else {
            return false;
        };
        let Some(valeur) = calc.resultat() else {
            return false;
        };
        let cible = *cible;
        let decimales = self.reglages.decimales;

        let applique = match cible {
            Cible::Individuel => self.individuel.appliquer_calculatrice(valeur, decimales),
            Cible::Groupe(i) => match (self.groupes.get_mut(i), format_resultat(valeur, decimales)) {
                (Some(g), Some(texte)) => {
                    g.total = texte;
                    true
                }
                _ => false,
            },
        };

        if applique {
            self.calculatrice = None;
        }
        applique
    }

    /* ------------------------ Validation / soumission ------------------------ */

    /// Tous les messages de ventilation actifs (individuel puis groupes).
    pub fn messages_validation(&self) -> Vec<String> {
        let r = &self.reglages;

        let individuel = self
            .individuel
            .validation(&r.libelle_individuel, &r.libelle_total_individuel)
            .message;

        let groupes = self.groupes.iter().filter_map(|g| {
            g.validation(&r.libelle_groupe, &r.libelle_total_groupe)
                .message
        });

        individuel.into_iter().chain(groupes).collect()
    }

    fn total_general(&self) -> u64 {
        self.groupes
            .iter()
            .fold(self.individuel.total(), |acc, g| {
                acc.saturating_add(g.total_declare())
            })
    }

    /// Raisons qui empêchent la soumission (vide = soumission possible).
    pub fn raisons_refus(&self) -> Vec<String> {
        let mut raisons = Vec::new();

        if self.site.trim().is_empty() {
            raisons.push("Host location is required".to_string());
        }
        if self.individuel.simple_invalide() {
            raisons.push("Individual total must be a whole number".to_string());
        }
        for (i, g) in self.groupes.iter().enumerate() {
            if g.total_invalide() {
                let nom = g.nom.trim();
                if nom.is_empty() {
                    raisons.push(format!("Group {} total must be a whole number", i + 1));
                } else {
                    raisons.push(format!("Group \"{nom}\" total must be a whole number"));
                }
            }
        }
        if self.total_general() == 0 {
            raisons.push("Enter at least one sandwich count".to_string());
        }
        raisons.extend(self.messages_validation());

        raisons
    }

    pub fn peut_soumettre(&self) -> bool {
        self.raisons_refus().is_empty()
    }

    /// Construit la charge utile (si tout est cohérent) puis remet le formulaire à zéro.
    pub fn soumettre(&mut self) -> Result<Soumission, Vec<String>> {
        let raisons = self.raisons_refus();
        if !raisons.is_empty() {
            warn!("soumission refusée: {}", raisons.join(" ; "));
            self.erreurs = raisons.clone();
            return Err(raisons);
        }

        let soumission = Soumission {
            site: self.site.trim().to_string(),
            individuel: self.individuel.vers_mode_total(),
            groupes: self
                .groupes
                .iter()
                .filter(|g| !g.est_vide())
                .map(SaisieGroupe::vers_soumission)
                .collect(),
        };

        info!(
            "soumission: site={} total={} groupes={}",
            soumission.site,
            soumission.total_sandwichs(),
            soumission.groupes.len()
        );

        self.reset();
        self.dernier_envoi = Some(soumission.clone());
        Ok(soumission)
    }

    /// Après un refus, suit les corrections de l’utilisateur (rien à faire sinon).
    pub fn rafraichir_erreurs(&mut self) {
        if !self.erreurs.is_empty() {
            self.erreurs = self.raisons_refus();
        }
    }

    /// Remise à zéro totale (réglages conservés).
    pub fn reset(&mut self) {
        let reglages = std::mem::take(&mut self.reglages);
        *self = Self::avec_reglages(reglages);
    }
}
