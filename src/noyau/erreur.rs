//! Noyau — erreurs et avertissements
//!
//! Deux familles bien séparées :
//! - `ErreurCalcul` : fatale, l’évaluation s’arrête net (aucun résultat partiel).
//! - `Avertissement` : forme indéterminée, signalée à l’appelant mais le calcul continue.
//!
//! Chaque message nomme le jeton ou la valeur fautive.

use std::fmt;

use thiserror::Error;

use super::fonctions::Fonction;
use super::jetons::Genre;

/// Erreur du tokenizer (caractère ou littéral illisible).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurLexicale {
    #[error("opérateur non reconnu '{caractere}' (position {position})")]
    OperateurInconnu { caractere: char, position: usize },

    #[error("nombre malformé \"{texte}\" (position {position})")]
    NombreMalforme { texte: String, position: usize },
}

/// Ce que la règle de grammaire attendait à la place du jeton courant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attendu {
    Genre(Genre),
    /// Début de facteur : nombre, constante, fonction, '(' ou '-'.
    Facteur,
}

impl fmt::Display for Attendu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attendu::Genre(g) => write!(f, "{g}"),
            Attendu::Facteur => f.write_str("un nombre, une constante, une fonction, '(' ou '-'"),
        }
    }
}

/// Erreur fatale d’une évaluation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Lexicale(#[from] ErreurLexicale),

    #[error("jeton inattendu : {trouve}, attendu : {attendu} (position {position})")]
    Syntaxe {
        trouve: Genre,
        attendu: Attendu,
        position: usize,
    },

    #[error("expression trop imbriquée : plus de {limite} niveaux (position {position})")]
    TropImbrique { position: usize, limite: usize },

    #[error("fonction inconnue : {nom} (position {position})")]
    FonctionInconnue { nom: String, position: usize },

    #[error("argument hors domaine : {fonction}({argument}) n’existe pas dans les réels")]
    Domaine { fonction: Fonction, argument: f64 },
}

/// Les quatre familles d’erreurs fatales.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategorieErreur {
    Lexicale,
    Syntaxe,
    IdentifiantInconnu,
    Domaine,
}

impl fmt::Display for CategorieErreur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CategorieErreur::Lexicale => "erreur lexicale",
            CategorieErreur::Syntaxe => "erreur de syntaxe",
            CategorieErreur::IdentifiantInconnu => "identifiant inconnu",
            CategorieErreur::Domaine => "erreur de domaine",
        })
    }
}

impl ErreurCalcul {
    pub fn categorie(&self) -> CategorieErreur {
        match self {
            ErreurCalcul::Lexicale(_) => CategorieErreur::Lexicale,
            ErreurCalcul::Syntaxe { .. } | ErreurCalcul::TropImbrique { .. } => {
                CategorieErreur::Syntaxe
            }
            ErreurCalcul::FonctionInconnue { .. } => CategorieErreur::IdentifiantInconnu,
            ErreurCalcul::Domaine { .. } => CategorieErreur::Domaine,
        }
    }
}

/// Forme indéterminée rencontrée en cours de calcul (non fatale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Avertissement {
    /// 0/0
    ZeroSurZero,
    /// x/0 avec x ≠ 0 (le quotient IEEE ±∞ est conservé)
    DivisionParZero { numerateur: f64 },
    /// 0^0 : le terme courant vaut NaN
    ZeroPuissanceZero,
    /// 0^(-1)
    InverseDeZero,
}

impl fmt::Display for Avertissement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Avertissement::ZeroSurZero => f.write_str("l’expression 0/0 est indéterminée"),
            Avertissement::DivisionParZero { numerateur } => {
                write!(f, "division par zéro : {numerateur}/0")
            }
            Avertissement::ZeroPuissanceZero => f.write_str("l’expression 0^0 est indéterminée"),
            Avertissement::InverseDeZero => f.write_str("l’inverse de 0 n’existe pas"),
        }
    }
}
