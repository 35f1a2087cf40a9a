//! Noyau pur (aucune UI, aucune E/S)
//!
//! Organisation interne :
//! - jetons.rs      : nettoyage + validation + tokenisation
//! - eval.rs        : réduction parenthèses -> * / -> + - (évaluateur sûr, remplace eval())
//! - ventilation.rs : cohérence ventilation / total déclaré
//! - format.rs      : arrondi côté appelant (exact, via rationnels)

pub mod eval;
pub mod format;
pub mod jetons;
pub mod ventilation;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluate, ErreurEvaluation};
pub use ventilation::{compte_depuis_texte, validate, EntreeVentilation, ResultatValidation};
