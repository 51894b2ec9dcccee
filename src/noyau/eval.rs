//! Noyau — évaluation (API publique)
//!
//! chaîne -> Analyseur (tokenizer amorcé) -> expression -> terme -> facteur -> f64
//!
//! Chaque appel construit son propre analyseur : aucun état partagé entre deux
//! évaluations, donc appels indépendants possibles depuis plusieurs threads.

use log::debug;

use super::analyse::Analyseur;
use super::erreur::{Avertissement, ErreurCalcul};
use super::jetons::format_jetons;

/// Résultat d’une évaluation réussie.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f64,
    /// Formes indéterminées rencontrées, dans l’ordre.
    pub avertissements: Vec<Avertissement>,
    /// Jetons lus (démarche).
    pub jetons: String,
}

/// Évalue une expression d’une ligne.
///
/// Erreur fatale => aucun résultat partiel. Les avertissements n’arrêtent pas le calcul.
pub fn eval_expression(expr_str: &str) -> Result<Evaluation, ErreurCalcul> {
    debug!("évaluation de {expr_str:?}");

    let mut analyseur = Analyseur::new(expr_str)?;
    let valeur = analyseur.evaluer().inspect_err(|e| debug!("échec : {e}"))?;
    let avertissements = analyseur.into_avertissements();

    debug!(
        "{expr_str:?} = {valeur} ({} avertissement(s))",
        avertissements.len()
    );

    Ok(Evaluation {
        valeur,
        avertissements,
        jetons: format_jetons(expr_str),
    })
}
