// src/noyau/fonctions.rs
//
// Table des fonctions unaires (catalogue fermé, insensible à la casse).
// - Résolution du nom : un `match`, aucune table construite à l’exécution.
// - cot / csc / sec / coth / arccot sont des INVERSES (1/f), pas des réciproques :
//   arccot(x) = 1/arctan(x), conservé tel quel.
// - sqrt d’un négatif : erreur fatale. Les autres bords de domaine donnent NaN/∞.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use super::erreur::ErreurCalcul;

/// Tolérance d’accrochage des zéros de sin/cos.
pub const EPSILON_ACCROCHAGE: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    // trigonométriques
    Sin,
    Cos,
    Tan,
    Cot,
    Csc,
    Sec,
    // exponentielle / logarithme
    Exp,
    Ln,
    // racines
    Sqrt,
    Cbrt,
    // hyperboliques
    Sinh,
    Cosh,
    Tanh,
    Coth,
    // cyclométriques
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
    // divers
    Abs,
    Floor,
    Ceil,
    Fracpart,
    Trunc,
    Max,
    Min,
    Round,
    Sgn,
}

impl Fonction {
    pub const TOUTES: [Fonction; 27] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Cot,
        Fonction::Csc,
        Fonction::Sec,
        Fonction::Exp,
        Fonction::Ln,
        Fonction::Sqrt,
        Fonction::Cbrt,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Coth,
        Fonction::Arcsin,
        Fonction::Arccos,
        Fonction::Arctan,
        Fonction::Arccot,
        Fonction::Abs,
        Fonction::Floor,
        Fonction::Ceil,
        Fonction::Fracpart,
        Fonction::Trunc,
        Fonction::Max,
        Fonction::Min,
        Fonction::Round,
        Fonction::Sgn,
    ];

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;

        let f = match nom.to_ascii_lowercase().as_str() {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "cot" => Cot,
            "csc" => Csc,
            "sec" => Sec,
            "exp" => Exp,
            "ln" => Ln,
            "sqrt" => Sqrt,
            "cbrt" => Cbrt,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "coth" => Coth,
            "arcsin" => Arcsin,
            "arccos" => Arccos,
            "arctan" => Arctan,
            "arccot" => Arccot,
            "||" | "abs" => Abs,
            "floor" => Floor,
            "ceil" => Ceil,
            "fracpart" => Fracpart,
            "trunc" => Trunc,
            "max" => Max,
            "min" => Min,
            "round" => Round,
            "sgn" => Sgn,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Cot => "cot",
            Csc => "csc",
            Sec => "sec",
            Exp => "exp",
            Ln => "ln",
            Sqrt => "sqrt",
            Cbrt => "cbrt",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Coth => "coth",
            Arcsin => "arcsin",
            Arccos => "arccos",
            Arctan => "arctan",
            Arccot => "arccot",
            Abs => "abs",
            Floor => "floor",
            Ceil => "ceil",
            Fracpart => "fracpart",
            Trunc => "trunc",
            Max => "max",
            Min => "min",
            Round => "round",
            Sgn => "sgn",
        }
    }

    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalcul> {
        use Fonction::*;

        let y = match self {
            Sin => sin_accroche(x),
            Cos => cos_accroche(x),
            Tan => x.tan(),
            Cot => 1.0 / x.tan(),
            Csc => 1.0 / x.sin(),
            Sec => 1.0 / x.cos(),

            Exp => x.exp(),
            Ln => x.ln(),

            Sqrt => {
                if x < 0.0 {
                    return Err(ErreurCalcul::Domaine {
                        fonction: self,
                        argument: x,
                    });
                }
                x.sqrt()
            }
            Cbrt => x.cbrt(),

            Sinh => x.sinh(),
            Cosh => x.cosh(),
            Tanh => x.tanh(),
            Coth => 1.0 / x.tanh(),

            Arcsin => x.asin(),
            Arccos => x.acos(),
            Arctan => x.atan(),
            Arccot => 1.0 / x.atan(),

            Abs => x.abs(),
            Floor => x.floor(),
            Ceil => x.ceil(),
            Fracpart => x - x.floor(),
            Trunc => x.trunc(),
            // un seul argument : identité
            Max | Min => x,
            Round => arrondi(x),
            Sgn => signe(x),
        };
        Ok(y)
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Vrai si x est à EPSILON_ACCROCHAGE près d’un multiple entier de `pas`.
/// Renvoie ce multiple.
fn multiple_proche(x: f64, pas: f64) -> Option<f64> {
    let k = x / pas;
    let k_entier = k.round();
    ((k - k_entier).abs() < EPSILON_ACCROCHAGE).then_some(k_entier)
}

/// sin(kπ) = 0 exactement.
fn sin_accroche(x: f64) -> f64 {
    match multiple_proche(x, PI) {
        Some(_) => 0.0,
        None => x.sin(),
    }
}

/// cos accroché sur TOUT multiple de π/2 (y compris 0 et π) : cos(0) = 0, conservé tel quel.
fn cos_accroche(x: f64) -> f64 {
    match multiple_proche(x, FRAC_PI_2) {
        Some(_) => 0.0,
        None => x.cos(),
    }
}

/// Plus proche entier, demi vers +∞ (2.5 -> 3, -2.5 -> -2).
/// Un zéro garde le signe de x : round(-0.4) = -0.
fn arrondi(x: f64) -> f64 {
    let plancher = x.floor();
    let r = if x - plancher >= 0.5 {
        plancher + 1.0
    } else {
        plancher
    };
    if r == 0.0 {
        r.copysign(x)
    } else {
        r
    }
}

/// -1, +1, ±0 conservé, NaN conservé.
fn signe(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        x
    } else {
        x.signum()
    }
}
