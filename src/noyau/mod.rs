//! Noyau flottant
//!
//! Organisation interne :
//! - jetons.rs    : tokenizer à la demande (un jeton par appel)
//! - analyse.rs   : descente récursive, évaluation immédiate
//! - fonctions.rs : table des fonctions unaires
//! - erreur.rs    : erreurs fatales + avertissements (formes indéterminées)
//! - format.rs    : affichage du résultat
//! - eval.rs      : point d’entrée

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{eval_expression, Evaluation};
