// src/app.rs
//
// Formulaire de collecte — module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (réglages, saisie, calculatrice, soumission, état, vue)
// - Ré-exporter FormulaireCollecte (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod calculatrice;
pub mod etat;
pub mod reglages;
pub mod saisie;
pub mod soumission;
pub mod vue;

// Ré-export pratique : `use collecte_sandwich::app::FormulaireCollecte;`
pub use etat::{Cible, FormulaireCollecte};

use eframe::egui;

impl eframe::App for FormulaireCollecte {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = fermer la calculatrice (comme "Cancel").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.fermer_calculatrice();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // vue.rs
        });

        // Modale par-dessus le panneau
        self.ui_calculatrice(ctx);
    }
}
