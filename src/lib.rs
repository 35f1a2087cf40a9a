//! Saisie de collectes de sandwichs
//!
//! - noyau : évaluateur arithmétique sûr + cohérence des ventilations (pur, sans UI)
//! - app   : formulaire (saisie simple/détaillée, calculatrice modale, soumission) + vue egui

pub mod app;
pub mod noyau;
