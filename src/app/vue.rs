// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Toute modification passe par les méthodes de saisie (saisir_simple,
// saisir_ventilation, ...) : on édite une copie, puis on l’applique si elle a changé.
// Validation recalculée à chaque frame (donc à chaque frappe).

use eframe::egui;
use log::debug;

use crate::noyau::format::DECIMALES_MAX;

use super::calculatrice::Calculatrice;
use super::etat::{Cible, FormulaireCollecte};
use super::saisie::{ChampVentilation, ModeSaisie};

const LARGEUR_CHAMP: f32 = 72.0;

impl FormulaireCollecte {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Sandwich collection");
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Host location :");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.site)
                            .hint_text("Ex: Dunwoody")
                            .id_salt("site_edit"),
                    );
                });

                ui.add_space(8.0);
                ui.separator();
                self.ui_individuel(ui);

                ui.add_space(8.0);
                ui.separator();
                self.ui_groupes(ui);

                ui.add_space(8.0);
                ui.separator();
                self.ui_soumission(ui);
            });
    }

    fn ui_individuel(&mut self, ui: &mut egui::Ui) {
        ui.label("Individual sandwiches");

        ui.horizontal(|ui| {
            ui.label("Total :");
            let mut simple = self.individuel.simple.clone();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut simple)
                    .desired_width(LARGEUR_CHAMP)
                    .id_salt("individuel_simple"),
            );
            if resp.changed() {
                self.individuel.saisir_simple(simple);
            }

            if ui.button("Calc").on_hover_text("Calculator").clicked() {
                self.ouvrir_calculatrice(Cible::Individuel);
            }

            let mode = match self.individuel.mode() {
                ModeSaisie::Vide => "empty",
                ModeSaisie::Simple => "simple",
                ModeSaisie::Detaille => "detailed",
            };
            ui.weak(format!("mode: {mode}"));
        });

        ui.label("…or by type :");
        let mut modif: Option<(usize, String)> = None;
        Self::ligne_ventilation(ui, "individuel", &self.individuel.ventilation, &mut modif);
        if let Some((i, texte)) = modif {
            self.individuel.saisir_ventilation(i, texte);
        }

        if self.individuel.mode() == ModeSaisie::Detaille {
            ui.monospace(format!("= {}", self.individuel.total()));
        }

        let r = &self.reglages;
        let v = self
            .individuel
            .validation(&r.libelle_individuel, &r.libelle_total_individuel);
        if v.bloquant() {
            ui.colored_label(ui.visuals().error_fg_color, v.message.unwrap_or_default());
        }
    }

    fn ui_groupes(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Groups");
            if ui.button("+ Add group").clicked() {
                self.ajouter_groupe();
            }
        });

        let mut a_retirer: Option<usize> = None;
        let mut calc_pour: Option<usize> = None;

        for (i, g) in self.groupes.iter_mut().enumerate() {
            ui.push_id(("groupe", i), |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut g.nom)
                            .hint_text("Group name")
                            .desired_width(160.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut g.total)
                            .hint_text("Count")
                            .desired_width(LARGEUR_CHAMP),
                    );
                    if ui.button("Calc").on_hover_text("Calculator").clicked() {
                        calc_pour = Some(i);
                    }
                    if ui.button("Remove").clicked() {
                        a_retirer = Some(i);
                    }
                });

                let mut modif: Option<(usize, String)> = None;
                Self::ligne_ventilation(ui, "groupe", &g.ventilation, &mut modif);
                if let Some((k, texte)) = modif {
                    if let Some(champ) = g.ventilation.get_mut(k) {
                        champ.texte = texte;
                    }
                }

                let r = &self.reglages;
                let v = g.validation(&r.libelle_groupe, &r.libelle_total_groupe);
                if v.bloquant() {
                    ui.colored_label(ui.visuals().error_fg_color, v.message.unwrap_or_default());
                }
            });
            ui.add_space(4.0);
        }

        if let Some(i) = calc_pour {
            self.ouvrir_calculatrice(Cible::Groupe(i));
        }
        if let Some(i) = a_retirer {
            self.retirer_groupe(i);
        }
    }

    /// Bouton toujours cliquable : un refus remplit `erreurs`, affichées ensuite.
    fn ui_soumission(&mut self, ui: &mut egui::Ui) {
        let pret = self.peut_soumettre();

        let mut bouton = ui.button("Submit collection");
        if !pret {
            bouton = bouton.on_hover_text("Some information is missing or inconsistent");
        }
        if bouton.clicked() {
            match self.soumettre() {
                Ok(s) => debug!("vue: envoi de {} sandwichs", s.total_sandwichs()),
                Err(raisons) => debug!("vue: {} raison(s) de refus", raisons.len()),
            }
        }

        self.rafraichir_erreurs();
        for e in &self.erreurs {
            ui.colored_label(ui.visuals().error_fg_color, e.as_str());
        }

        if let Some(s) = &self.dernier_envoi {
            ui.add_space(6.0);
            ui.label(format!(
                "Last submission: {} ({} sandwiches)",
                s.site,
                s.total_sandwichs()
            ));
            if let Ok(json) = s.to_json() {
                ui.monospace(json);
            }
        }
    }

    /// Champs d’une ventilation. La modification éventuelle sort par `modif`.
    fn ligne_ventilation(
        ui: &mut egui::Ui,
        id: &str,
        champs: &[ChampVentilation],
        modif: &mut Option<(usize, String)>,
    ) {
        egui::Grid::new(id)
            .num_columns(champs.len())
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                for c in champs {
                    ui.label(c.categorie.as_str());
                }
                ui.end_row();

                for (i, c) in champs.iter().enumerate() {
                    let mut texte = c.texte.clone();
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut texte)
                            .desired_width(LARGEUR_CHAMP)
                            .id_salt((id, i)),
                    );
                    if resp.changed() {
                        *modif = Some((i, texte));
                    }
                }
                ui.end_row();
            });
    }

    /* ------------------------ Calculatrice (modale) ------------------------ */

    pub fn ui_calculatrice(&mut self, ctx: &egui::Context) {
        let mut decimales = self.reglages.decimales;
        let Some((_, calc)) = self.calculatrice.as_mut() else {
            return;
        };

        let mut action: Option<ActionModale> = None;

        egui::Window::new("Calculator")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.set_min_width(200.0);
                        let texte = if calc.affichage.is_empty() {
                            "0"
                        } else {
                            calc.affichage.as_str()
                        };
                        ui.monospace(texte);
                    });

                ui.add_space(6.0);
                Self::ui_pave(ui, calc, decimales);
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.label("Rounding :");
                    ui.add(
                        egui::DragValue::new(&mut decimales)
                            .speed(1)
                            .range(0..=DECIMALES_MAX)
                            .suffix(" decimals"),
                    );
                });

                ui.horizontal(|ui| {
                    let dispo = calc.resultat().is_some();
                    if ui.add_enabled(dispo, egui::Button::new("Use result")).clicked() {
                        action = Some(ActionModale::Utiliser);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(ActionModale::Annuler);
                    }
                });
            });

        if decimales != self.reglages.decimales {
            self.reglages.set_decimales(decimales);
        }

        match action {
            Some(ActionModale::Utiliser) => {
                self.utiliser_resultat();
            }
            Some(ActionModale::Annuler) => self.fermer_calculatrice(),
            None => {}
        }
    }

    fn ui_pave(ui: &mut egui::Ui, calc: &mut Calculatrice, decimales: u32) {
        const TOUCHES: [[char; 4]; 4] = [
            ['7', '8', '9', '/'],
            ['4', '5', '6', '*'],
            ['1', '2', '3', '-'],
            ['0', '.', '=', '+'],
        ];

        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in TOUCHES {
                    for t in ligne {
                        let b = ui.add_sized([46.0, 30.0], egui::Button::new(t.to_string()));
                        if b.clicked() {
                            if t == '=' {
                                calc.calculer(decimales);
                            } else {
                                calc.appuyer(t);
                            }
                        }
                    }
                    ui.end_row();
                }

                if ui.add_sized([46.0, 30.0], egui::Button::new("(")).clicked() {
                    calc.appuyer('(');
                }
                if ui.add_sized([46.0, 30.0], egui::Button::new(")")).clicked() {
                    calc.appuyer(')');
                }
                if ui.add_sized([46.0, 30.0], egui::Button::new("DEL")).clicked() {
                    calc.retour();
                }
                if ui.add_sized([46.0, 30.0], egui::Button::new("C")).clicked() {
                    calc.effacer();
                }
                ui.end_row();
            });
    }
}

#[derive(Clone, Copy, Debug)]
enum ActionModale {
    Utiliser,
    Annuler,
}
