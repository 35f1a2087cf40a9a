//! src/app/soumission.rs
//!
//! Valeur soumise par le formulaire : type discriminé (simple | détaillé)
//! au lieu d’un dictionnaire construit au fil de l’eau.
//! La sérialisation JSON est fournie ; l’envoi HTTP reste hors de ce crate.

use serde::Serialize;

use crate::noyau::EntreeVentilation;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LigneVentilation {
    #[serde(rename = "category")]
    pub categorie: String,
    #[serde(rename = "count")]
    pub compte: u64,
}

impl From<&EntreeVentilation> for LigneVentilation {
    fn from(e: &EntreeVentilation) -> Self {
        Self {
            categorie: e.libelle.clone(),
            compte: e.compte,
        }
    }
}

/// Total d’une saisie : un seul nombre OU une ventilation par catégorie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode")]
pub enum ModeTotal {
    #[serde(rename = "simple")]
    Simple { total: u64 },

    #[serde(rename = "detailed")]
    Detaille {
        total: u64,
        #[serde(rename = "breakdown")]
        ventilation: Vec<LigneVentilation>,
    },
}

impl ModeTotal {
    pub fn total(&self) -> u64 {
        match self {
            ModeTotal::Simple { total } | ModeTotal::Detaille { total, .. } => *total,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SoumissionGroupe {
    #[serde(rename = "name")]
    pub nom: String,
    #[serde(rename = "count")]
    pub total: u64,
    /// Vide si le groupe n’a pas été ventilé.
    #[serde(rename = "breakdown", skip_serializing_if = "Vec::is_empty")]
    pub ventilation: Vec<LigneVentilation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Soumission {
    #[serde(rename = "hostLocation")]
    pub site: String,
    #[serde(rename = "individual")]
    pub individuel: ModeTotal,
    #[serde(rename = "groups")]
    pub groupes: Vec<SoumissionGroupe>,
}

impl Soumission {
    /// Total général (individuel + groupes).
    pub fn total_sandwichs(&self) -> u64 {
        self.groupes
            .iter()
            .fold(self.individuel.total(), |acc, g| acc.saturating_add(g.total))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_simple() {
        let s = Soumission {
            site: "Dunwoody".into(),
            individuel: ModeTotal::Simple { total: 95 },
            groupes: vec![],
        };
        let v: serde_json::Value = serde_json::from_str(&s.to_json().unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "hostLocation": "Dunwoody",
                "individual": { "mode": "simple", "total": 95 },
                "groups": []
            })
        );
    }

    #[test]
    fn json_detaille_et_groupes() {
        let s = Soumission {
            site: "Alpharetta".into(),
            individuel: ModeTotal::Detaille {
                total: 8,
                ventilation: vec![
                    LigneVentilation { categorie: "Deli".into(), compte: 5 },
                    LigneVentilation { categorie: "PBJ".into(), compte: 3 },
                ],
            },
            groupes: vec![
                SoumissionGroupe { nom: "Scouts".into(), total: 40, ventilation: vec![] },
                SoumissionGroupe {
                    nom: "Church".into(),
                    total: 10,
                    ventilation: vec![LigneVentilation { categorie: "Ham".into(), compte: 10 }],
                },
            ],
        };
        let v: serde_json::Value = serde_json::from_str(&s.to_json().unwrap()).unwrap();
        assert_eq!(v["individual"]["mode"], "detailed");
        assert_eq!(v["individual"]["breakdown"][1]["category"], "PBJ");
        assert!(v["groups"][0].get("breakdown").is_none());
        assert_eq!(v["groups"][1]["breakdown"][0]["count"], 10);
        assert_eq!(s.total_sandwichs(), 58);
    }
}
