// src/noyau/format.rs
//
// Affichage du résultat flottant.
// Valeur finie : écriture décimale la plus courte qui relit la même valeur
// (pas d’exposant, donc directement réinjectable dans l’entrée).

pub fn format_resultat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "∞".to_string()
    } else if v == f64::NEG_INFINITY {
        "-∞".to_string()
    } else if v == 0.0 {
        // pas de "-0" à l’écran
        "0".to_string()
    } else {
        format!("{v}")
    }
}
