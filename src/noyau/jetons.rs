// src/noyau/jetons.rs
//
// Tokenizer “à la demande” : un jeton par appel, le curseur ne recule jamais.
// Règles, par priorité à chaque position :
// - chiffre      -> nombre (entier, ou flottant si un point décimal)
// - lettre ASCII -> pi / e (insensible à la casse) ou identifiant brut
// - espace       -> ignoré
// - sinon        -> un seul caractère parmi + - * / % ^ ( )

use std::f64::consts::{E, PI};
use std::fmt;

use super::erreur::ErreurLexicale;

/// Genre d’un jeton (catalogue fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Genre {
    Entier,
    Flottant,
    Pi,
    Euler,
    Ident,

    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,

    ParG,
    ParD,

    Fin,
}

impl Genre {
    /// Opérateurs de niveau “terme” : * / % ^
    pub fn est_multiplicatif(self) -> bool {
        matches!(
            self,
            Genre::Fois | Genre::Divise | Genre::Modulo | Genre::Puissance
        )
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Genre::Entier => "entier",
            Genre::Flottant => "flottant",
            Genre::Pi => "pi",
            Genre::Euler => "e",
            Genre::Ident => "identifiant",
            Genre::Plus => "'+'",
            Genre::Moins => "'-'",
            Genre::Fois => "'*'",
            Genre::Divise => "'/'",
            Genre::Modulo => "'%'",
            Genre::Puissance => "'^'",
            Genre::ParG => "'('",
            Genre::ParD => "')'",
            Genre::Fin => "fin de saisie",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Nombre(f64),
    Texte(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub genre: Genre,
    /// Nombre pour littéraux et constantes, texte brut pour les identifiants.
    pub valeur: Option<Valeur>,
    /// Indice (en caractères) du début du jeton.
    pub position: usize,
}

impl Jeton {
    fn simple(genre: Genre, position: usize) -> Self {
        Self {
            genre,
            valeur: None,
            position,
        }
    }

    pub fn nombre(&self) -> Option<f64> {
        match self.valeur {
            Some(Valeur::Nombre(n)) => Some(n),
            _ => None,
        }
    }

    pub fn texte(&self) -> Option<&str> {
        match &self.valeur {
            Some(Valeur::Texte(t)) => Some(t.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.genre, &self.valeur) {
            (Genre::Pi, _) => f.write_str("π"),
            (Genre::Euler, _) => f.write_str("e"),
            (_, Some(Valeur::Nombre(n))) => write!(f, "{n}"),
            (_, Some(Valeur::Texte(t))) => f.write_str(t),
            (Genre::Fin, None) => Ok(()),
            (g, None) => f.write_str(g.to_string().trim_matches('\'')),
        }
    }
}

pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    // Iterator : plus rien après Fin ou après une erreur.
    termine: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            termine: false,
        }
    }

    /// Jeton suivant. Entrée épuisée => `Fin`, autant de fois qu’on le demande.
    pub fn prochain_jeton(&mut self) -> Result<Jeton, ErreurLexicale> {
        while let Some(&c) = self.chars.get(self.pos) {
            if c.is_ascii_digit() {
                return self.lire_nombre();
            }
            if c.is_ascii_alphabetic() {
                return Ok(self.lire_mot());
            }
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }
            return self.lire_operateur(c);
        }

        Ok(Jeton::simple(Genre::Fin, self.chars.len()))
    }

    fn lire_nombre(&mut self) -> Result<Jeton, ErreurLexicale> {
        let debut = self.pos;
        let mut points = 0usize;

        while let Some(&c) = self.chars.get(self.pos) {
            if c == '.' {
                points += 1;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }

        let texte: String = self.chars[debut..self.pos].iter().collect();

        // "1.2.3" : refusé plutôt que lu à moitié
        let n = match texte.parse::<f64>() {
            Ok(n) if points <= 1 => n,
            _ => {
                return Err(ErreurLexicale::NombreMalforme {
                    texte,
                    position: debut,
                })
            }
        };

        let genre = if points == 1 {
            Genre::Flottant
        } else {
            Genre::Entier
        };

        Ok(Jeton {
            genre,
            valeur: Some(Valeur::Nombre(n)),
            position: debut,
        })
    }

    fn lire_mot(&mut self) -> Jeton {
        let debut = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_ascii_alphabetic())
        {
            self.pos += 1;
        }

        let mot: String = self.chars[debut..self.pos].iter().collect();

        let (genre, valeur) = match mot.to_ascii_lowercase().as_str() {
            "pi" => (Genre::Pi, Valeur::Nombre(PI)),
            "e" => (Genre::Euler, Valeur::Nombre(E)),
            _ => (Genre::Ident, Valeur::Texte(mot)),
        };

        Jeton {
            genre,
            valeur: Some(valeur),
            position: debut,
        }
    }

    fn lire_operateur(&mut self, c: char) -> Result<Jeton, ErreurLexicale> {
        let genre = match c {
            '+' => Genre::Plus,
            '-' => Genre::Moins,
            '*' => Genre::Fois,
            '/' => Genre::Divise,
            '%' => Genre::Modulo,
            '^' => Genre::Puissance,
            '(' => Genre::ParG,
            ')' => Genre::ParD,
            _ => {
                return Err(ErreurLexicale::OperateurInconnu {
                    caractere: c,
                    position: self.pos,
                })
            }
        };

        let jeton = Jeton::simple(genre, self.pos);
        self.pos += 1;
        Ok(jeton)
    }
}

/// Parcours complet, sans le jeton `Fin`. S’arrête après la première erreur.
impl Iterator for Tokenizer {
    type Item = Result<Jeton, ErreurLexicale>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termine {
            return None;
        }
        match self.prochain_jeton() {
            Ok(j) if j.genre == Genre::Fin => {
                self.termine = true;
                None
            }
            Err(e) => {
                self.termine = true;
                Some(Err(e))
            }
            ok => Some(ok),
        }
    }
}

/// Liste des jetons en texte (panneau “Démarche”). S’arrête au premier jeton illisible.
pub fn format_jetons(s: &str) -> String {
    Tokenizer::new(s)
        .map_while(Result::ok)
        .map(|j| j.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
