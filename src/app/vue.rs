// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Clavier virtuel décrit par des `Touche` (tables constantes), un seul point
// d’application : `appuyer`. Le dessin egui ne fait que relier bouton -> touche.
//
// Note : PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::fonctions::Fonction;
use crate::noyau::format::format_resultat;

/// Ce qu’efface une touche d’effacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Portee {
    Entree,
    Resultats,
    Tout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Touche {
    Chiffre(char),
    Operateur(char),
    Constante(&'static str),
    Appel(Fonction),
    ParG,
    ParD,
    Retour,
    Effacer(Portee),
}

impl Touche {
    fn etiquette(self) -> String {
        match self {
            Touche::Chiffre(c) | Touche::Operateur(c) => c.to_string(),
            Touche::Constante(nom) => nom.to_string(),
            Touche::Appel(f) => f.nom().to_string(),
            Touche::ParG => "(".into(),
            Touche::ParD => ")".into(),
            Touche::Retour => "DEL".into(),
            Touche::Effacer(Portee::Entree) => "C".into(),
            Touche::Effacer(Portee::Resultats) => "CLR".into(),
            Touche::Effacer(Portee::Tout) => "AC".into(),
        }
    }

    fn bulle(self) -> Option<&'static str> {
        match self {
            Touche::Retour => Some("Efface le dernier symbole (ou un appel entier)"),
            Touche::Effacer(Portee::Entree) => Some("Efface seulement l’entrée"),
            Touche::Effacer(Portee::Resultats) => {
                Some("Efface résultat + avertissements + erreur + démarche")
            }
            Touche::Effacer(Portee::Tout) => Some("Remise à zéro totale (historique compris)"),
            _ => None,
        }
    }
}

const EFFACEMENTS: [Touche; 3] = [
    Touche::Effacer(Portee::Entree),
    Touche::Effacer(Portee::Resultats),
    Touche::Effacer(Portee::Tout),
];

const SYMBOLES: [Touche; 6] = [
    Touche::ParG,
    Touche::ParD,
    Touche::Operateur('%'),
    Touche::Operateur('^'),
    Touche::Constante("pi"),
    Touche::Constante("e"),
];

const PAVE: [[Touche; 4]; 4] = [
    [
        Touche::Chiffre('7'),
        Touche::Chiffre('8'),
        Touche::Chiffre('9'),
        Touche::Retour,
    ],
    [
        Touche::Chiffre('4'),
        Touche::Chiffre('5'),
        Touche::Chiffre('6'),
        Touche::Operateur('/'),
    ],
    [
        Touche::Chiffre('1'),
        Touche::Chiffre('2'),
        Touche::Chiffre('3'),
        Touche::Operateur('*'),
    ],
    [
        Touche::Chiffre('0'),
        Touche::Chiffre('.'),
        Touche::Operateur('-'),
        Touche::Operateur('+'),
    ],
];

/// Fonctions par ligne dans le catalogue.
const FONCTIONS_PAR_LIGNE: usize = 6;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice flottante");
                ui.add_space(6.0);

                self.ui_entree(ui);
                ui.add_space(8.0);
                self.ui_clavier(ui);

                ui.separator();
                self.ui_resultats(ui);

                ui.separator();
                self.ui_demarche(ui);
                self.ui_historique(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3*4, sin(pi/2) + ln(exp(1)), sqrt(2)^2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter n’évalue que si le champ a le focus
        if resp.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.eval_via_noyau();
        }

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_clavier(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for t in EFFACEMENTS {
                self.touche(ui, t);
            }
            ui.separator();
            for t in SYMBOLES {
                self.touche(ui, t);
            }
            if ui.add_sized([56.0, 30.0], egui::Button::new("=")).clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(6.0);

        egui::Grid::new("clavier_fonctions")
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in Fonction::TOUTES.chunks(FONCTIONS_PAR_LIGNE) {
                    for &f in ligne {
                        self.touche(ui, Touche::Appel(f));
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        egui::Grid::new("pave_numerique")
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for t in ligne {
                        self.touche(ui, t);
                    }
                    ui.end_row();
                }
            });
    }

    fn touche(&mut self, ui: &mut egui::Ui, t: Touche) {
        let mut resp = ui.add_sized([56.0, 28.0], egui::Button::new(t.etiquette()));
        if let Some(bulle) = t.bulle() {
            resp = resp.on_hover_text(bulle);
        }
        if resp.clicked() {
            self.appuyer(t);
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Résultat :");
            ui.monospace(egui::RichText::new(self.resultat.as_str()).strong());
        });

        for a in &self.avertissements {
            ui.colored_label(ui.visuals().warn_fg_color, format!("⚠ {a}"));
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche (jetons lus)")
            .default_open(false)
            .show(ui, |ui| {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.monospace(self.demarche.as_str());
                    });
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut rappel = None;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                for (i, ligne) in self.historique.iter().enumerate() {
                    let texte = format!("{} = {}", ligne.expression, ligne.resultat);
                    if ui
                        .button(texte)
                        .on_hover_text("Recopier dans l’entrée")
                        .clicked()
                    {
                        rappel = Some(i);
                    }
                }
            });

        if let Some(i) = rappel {
            self.rappeler(i);
        }
    }

    /* ------------------------ Effet des touches (sans egui) ------------------------ */

    fn appuyer(&mut self, t: Touche) {
        match t {
            Touche::Chiffre(c) => self.entree.push(c),
            Touche::Operateur(op) => {
                self.rogner_fin();
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push(op);
                self.entree.push(' ');
            }
            Touche::ParD => {
                self.rogner_fin();
                self.entree.push(')');
            }
            Touche::ParG => self.ajouter_separe("("),
            Touche::Constante(nom) => self.ajouter_separe(nom),
            Touche::Appel(f) => self.ajouter_separe(&format!("{}(", f.nom())),
            Touche::Retour => self.retour_arriere(),
            Touche::Effacer(Portee::Entree) => self.clear_entree(),
            Touche::Effacer(Portee::Resultats) => self.clear_resultats(),
            Touche::Effacer(Portee::Tout) => self.reset_total(),
        }
        self.focus_entree = true;
    }

    fn rogner_fin(&mut self) {
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
    }

    /// Espace avant un mot collé à un chiffre, une lettre ou ')' : "2 pi", pas "2pi" ; "sin e", pas "sine".
    fn ajouter_separe(&mut self, texte: &str) {
        if self
            .entree
            .ends_with(|c: char| c.is_ascii_alphanumeric() || c == ')')
        {
            self.entree.push(' ');
        }
        self.entree.push_str(texte);
    }

    /// Retire d’un coup un appel "nom(" ou "pi", sinon un caractère.
    fn retour_arriere(&mut self) {
        self.rogner_fin();

        // motif le plus long : "arcsin(" avant "sin("
        let motif = Fonction::TOUTES
            .iter()
            .map(|f| format!("{}(", f.nom()))
            .chain(std::iter::once("pi".to_string()))
            .filter(|m| self.entree.ends_with(m.as_str()))
            .max_by_key(String::len);

        let retire = match motif {
            Some(m) => m.len(),
            None => self.entree.chars().last().map_or(0, char::len_utf8),
        };
        self.entree.truncate(self.entree.len() - retire);
        self.rogner_fin();
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat/avertissements/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match crate::noyau::eval_expression(&s) {
            Ok(ev) => {
                let avertissements = ev.avertissements.iter().map(ToString::to_string).collect();
                self.set_resultat(s, format_resultat(ev.valeur), avertissements, ev.jetons);
            }
            Err(e) => self.set_erreur(format!("{} : {e}", e.categorie())),
        }
    }
}
