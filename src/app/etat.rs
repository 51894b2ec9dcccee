//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, avertissements,
//! erreur, démarche, historique) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné.

use std::collections::VecDeque;

/// Garde-fou : nombre de lignes d’historique conservées.
pub const HISTORIQUE_MAX: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub avertissements: Vec<String>, // formes indéterminées (non fatales)
    pub erreur: String,              // message d’erreur fatale

    // --- démarche : jetons lus ---
    pub demarche: String,

    // --- dernières évaluations réussies (plus récente en tête) ---
    pub historique: VecDeque<LigneHistorique>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            avertissements: Vec::new(),
            erreur: String::new(),
            demarche: String::new(),
            historique: VecDeque::with_capacity(HISTORIQUE_MAX),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.historique.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + avertissements + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.avertissements.clear();
        self.erreur.clear();
        self.demarche.clear();
        self.focus_entree = true;
    }

    /// Placer une erreur.
    ///
    /// On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// Avertissements et démarche ne concernent plus l’entrée courante : effacés.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.avertissements.clear();
        self.demarche.clear();
        self.focus_entree = true;
    }

    /// Déposer un résultat complet et l’inscrire dans l’historique.
    pub fn set_resultat(
        &mut self,
        expression: impl Into<String>,
        resultat: impl Into<String>,
        avertissements: Vec<String>,
        demarche: impl Into<String>,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.avertissements = avertissements;
        self.demarche = demarche.into();

        self.historique.push_front(LigneHistorique {
            expression: expression.into(),
            resultat: self.resultat.clone(),
        });
        self.historique.truncate(HISTORIQUE_MAX);

        self.focus_entree = true;
    }

    /// Recopie une expression de l’historique dans l’entrée.
    pub fn rappeler(&mut self, index: usize) {
        if let Some(ligne) = self.historique.get(index) {
            self.entree = ligne.expression.clone();
        }
        self.focus_entree = true;
    }
}
