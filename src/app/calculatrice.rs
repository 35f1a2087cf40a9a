//! src/app/calculatrice.rs
//!
//! Calculatrice modale (aide à la saisie d’un total).
//!
//! Contrats :
//! - Aucun eval() : tout passe par noyau::evaluate.
//! - Une erreur d’évaluation n’est jamais propagée : l’affichage devient "Error".

use log::debug;

use crate::noyau::evaluate;
use crate::noyau::format::format_resultat;

/// Texte affiché quand l’évaluation échoue.
pub const AFFICHAGE_ERREUR: &str = "Error";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calculatrice {
    pub affichage: String,

    // valeur posée par "=" (l’affichage "-5" n’est pas ré-évaluable : pas de moins unaire)
    dernier: Option<f64>,
}

fn est_operateur(touche: char) -> bool {
    matches!(touche, '+' | '-' | '*' | '/')
}

impl Calculatrice {
    /// Touche du pavé (chiffre, '.', opérateur, parenthèse).
    /// - Après "Error", une nouvelle frappe repart d’un affichage vide.
    /// - Après "=", un opérateur continue le calcul, toute autre touche repart de zéro.
    pub fn appuyer(&mut self, touche: char) {
        if self.affichage == AFFICHAGE_ERREUR {
            self.affichage.clear();
        }

        if let Some(v) = self.dernier.take() {
            if !est_operateur(touche) {
                self.affichage.clear();
            } else if v < 0.0 {
                // "-5" + "+3" => "(0-5)+3"
                self.affichage = format!("(0{})", self.affichage);
            }
        }

        self.affichage.push(touche);
    }

    /// DEL : retire le dernier symbole (ou efface "Error" d’un coup).
    pub fn retour(&mut self) {
        self.dernier = None;
        if self.affichage == AFFICHAGE_ERREUR {
            self.affichage.clear();
            return;
        }
        self.affichage.pop();
    }

    /// C : remise à zéro.
    pub fn effacer(&mut self) {
        self.dernier = None;
        self.affichage.clear();
    }

    /// "=" : remplace l’expression par son résultat arrondi, ou par "Error".
    pub fn calculer(&mut self, decimales: u32) {
        let texte = evaluate(&self.affichage)
            .ok()
            .and_then(|v| format_resultat(v, decimales));

        // valeur = ce qui est affiché (arrondi compris)
        match texte.and_then(|t| t.parse::<f64>().ok().map(|v| (t, v))) {
            Some((t, v)) => {
                self.affichage = t;
                self.dernier = Some(v);
            }
            None => {
                debug!("calculatrice: échec sur {:?}", self.affichage);
                self.affichage = AFFICHAGE_ERREUR.to_string();
                self.dernier = None;
            }
        }
    }

    /// Valeur courante : celle posée par "=", sinon l’évaluation de l’affichage.
    /// None si "Error" ou expression invalide.
    pub fn resultat(&self) -> Option<f64> {
        if let Some(v) = self.dernier {
            return Some(v);
        }
        if self.affichage == AFFICHAGE_ERREUR {
            return None;
        }
        match evaluate(&self.affichage) {
            Ok(v) if v.is_finite() => Some(v),
            Ok(_) => None,
            Err(e) => {
                debug!("calculatrice: résultat indisponible ({e})");
                None
            }
        }
    }
}
