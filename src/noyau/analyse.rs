// src/noyau/analyse.rs
//
// Descente récursive avec évaluation immédiate (aucun arbre construit).
//
//   expression := terme ( ('+' | '-') terme )*
//   terme      := facteur ( ('*' | '/' | '%' | '^') facteur )*
//   facteur    := NOMBRE | pi | e
//               | IDENT '(' expression ')'
//               | '(' expression ')'
//               | '-' facteur
//
// Tous les binaires sont associatifs à gauche : 2^3^2 = (2^3)^2 = 64.
// Le moins unaire descend dans facteur : -2^2 = (-2)^2 = 4.
//
// Invariant : `courant` est toujours le prochain jeton non consommé ;
// seul `consommer` le fait avancer, après vérification du genre.

use log::{trace, warn};

use super::erreur::{Attendu, Avertissement, ErreurCalcul};
use super::fonctions::Fonction;
use super::jetons::{Genre, Jeton, Tokenizer};

/// Garde-fou anti-pile : parenthèses, appels et moins unaires imbriqués.
pub const PROFONDEUR_MAX: usize = 256;

pub struct Analyseur {
    tokenizer: Tokenizer,
    courant: Jeton,
    profondeur: usize,
    avertissements: Vec<Avertissement>,
}

impl Analyseur {
    /// Crée le tokenizer et amorce le premier jeton.
    pub fn new(input: &str) -> Result<Self, ErreurCalcul> {
        let mut tokenizer = Tokenizer::new(input);
        let courant = tokenizer.prochain_jeton()?;
        Ok(Self {
            tokenizer,
            courant,
            profondeur: 0,
            avertissements: Vec::new(),
        })
    }

    /// Évalue une expression complète : tout doit être consommé jusqu’à `Fin`.
    pub fn evaluer(&mut self) -> Result<f64, ErreurCalcul> {
        let valeur = self.expression()?;
        self.consommer(Genre::Fin)?;
        Ok(valeur)
    }

    pub fn into_avertissements(self) -> Vec<Avertissement> {
        self.avertissements
    }

    fn consommer(&mut self, attendu: Genre) -> Result<Jeton, ErreurCalcul> {
        if self.courant.genre != attendu {
            return Err(ErreurCalcul::Syntaxe {
                trouve: self.courant.genre,
                attendu: Attendu::Genre(attendu),
                position: self.courant.position,
            });
        }

        let suivant = self.tokenizer.prochain_jeton()?;
        let jeton = std::mem::replace(&mut self.courant, suivant);
        trace!("jeton {} @{}", jeton.genre, jeton.position);
        Ok(jeton)
    }

    fn signaler(&mut self, avertissement: Avertissement) {
        warn!("{avertissement}");
        self.avertissements.push(avertissement);
    }

    fn expression(&mut self) -> Result<f64, ErreurCalcul> {
        let mut resultat = self.terme()?;

        loop {
            match self.courant.genre {
                Genre::Plus => {
                    self.consommer(Genre::Plus)?;
                    resultat += self.terme()?;
                }
                Genre::Moins => {
                    self.consommer(Genre::Moins)?;
                    resultat -= self.terme()?;
                }
                _ => return Ok(resultat),
            }
        }
    }

    fn terme(&mut self) -> Result<f64, ErreurCalcul> {
        let mut resultat = self.facteur()?;

        // Après 0^0 le terme vaut NaN pour de bon : les facteurs suivants
        // sont encore lus (syntaxe vérifiée, entrée consommée) mais plus repliés.
        let mut court_circuit = false;

        loop {
            let op = self.courant.genre;
            if !op.est_multiplicatif() {
                return Ok(resultat);
            }
            self.consommer(op)?;

            // opérande droit évalué une seule fois
            let droite = self.facteur()?;
            if court_circuit {
                continue;
            }

            resultat = match op {
                Genre::Fois => resultat * droite,
                Genre::Divise => self.diviser(resultat, droite),
                Genre::Modulo => resultat % droite,
                _ => match self.puissance(resultat, droite) {
                    Some(v) => v,
                    None => {
                        court_circuit = true;
                        f64::NAN
                    }
                },
            };
        }
    }

    fn facteur(&mut self) -> Result<f64, ErreurCalcul> {
        // littéraux et constantes portent déjà leur valeur
        if let Some(n) = self.courant.nombre() {
            let genre = self.courant.genre;
            self.consommer(genre)?;
            return Ok(n);
        }

        match self.courant.genre {
            Genre::Ident => self.appel_fonction(),
            Genre::ParG => self.imbrique(Self::entre_parentheses),
            Genre::Moins => self.imbrique(|a| {
                a.consommer(Genre::Moins)?;
                Ok(-a.facteur()?)
            }),
            autre => Err(ErreurCalcul::Syntaxe {
                trouve: autre,
                attendu: Attendu::Facteur,
                position: self.courant.position,
            }),
        }
    }

    fn appel_fonction(&mut self) -> Result<f64, ErreurCalcul> {
        let ident = self.consommer(Genre::Ident)?;
        let argument = self.imbrique(Self::entre_parentheses)?;

        let nom = ident.texte().unwrap_or_default();
        let fonction =
            Fonction::depuis_nom(nom).ok_or_else(|| ErreurCalcul::FonctionInconnue {
                nom: nom.to_string(),
                position: ident.position,
            })?;

        let valeur = fonction.appliquer(argument)?;
        trace!("{fonction}({argument}) = {valeur}");
        Ok(valeur)
    }

    fn entre_parentheses(&mut self) -> Result<f64, ErreurCalcul> {
        self.consommer(Genre::ParG)?;
        let valeur = self.expression()?;
        self.consommer(Genre::ParD)?;
        Ok(valeur)
    }

    fn imbrique(
        &mut self,
        regle: impl FnOnce(&mut Self) -> Result<f64, ErreurCalcul>,
    ) -> Result<f64, ErreurCalcul> {
        if self.profondeur >= PROFONDEUR_MAX {
            return Err(ErreurCalcul::TropImbrique {
                position: self.courant.position,
                limite: PROFONDEUR_MAX,
            });
        }
        self.profondeur += 1;
        let resultat = regle(self);
        self.profondeur -= 1;
        resultat
    }

    /// a/b en IEEE ; b = 0 n’est qu’un avertissement.
    fn diviser(&mut self, a: f64, b: f64) -> f64 {
        if b == 0.0 {
            let avertissement = if a == 0.0 {
                Avertissement::ZeroSurZero
            } else {
                Avertissement::DivisionParZero { numerateur: a }
            };
            self.signaler(avertissement);
        }
        a / b
    }

    /// None : 0^0, le terme doit court-circuiter à NaN.
    fn puissance(&mut self, base: f64, exposant: f64) -> Option<f64> {
        if base == 0.0 && exposant == 0.0 {
            self.signaler(Avertissement::ZeroPuissanceZero);
            return None;
        }
        if base == 0.0 && exposant == -1.0 {
            self.signaler(Avertissement::InverseDeZero);
        }
        Some(base.powf(exposant))
    }
}
