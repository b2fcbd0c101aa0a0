use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::participant::participant::lenient_discipline;
use crate::domain::participant::Discipline;
use crate::domain::team::TeamRecord;

/// Overall team classification as published by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podium {
    #[serde(default)]
    pub podio: Vec<TeamRecord>,
    #[serde(default)]
    pub otros: Vec<TeamRecord>,
}

impl Podium {
    /// Sorts both lists by position; teams without one go last
    pub fn ordered(mut self) -> Self {
        sort_by_position(&mut self.podio);
        sort_by_position(&mut self.otros);
        self
    }
}

fn sort_by_position(teams: &mut [TeamRecord]) {
    teams.sort_by_key(|t| t.posicion.unwrap_or(u32::MAX));
}

/// Individual prize awarded to a participant
///
/// Only the discipline is interpreted here; every other field the backend
/// sends is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_discipline")]
    pub disciplina: Option<Discipline>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Sorts prizes natación, ciclismo, atletismo; unknown disciplines last
pub fn sort_prizes(prizes: &mut [Prize]) {
    prizes.sort_by_key(|p| {
        p.disciplina
            .and_then(|d| d.race_position())
            .unwrap_or(usize::MAX)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, posicion: Option<u32>) -> TeamRecord {
        TeamRecord {
            id: id.to_string(),
            nombre: id.to_uppercase(),
            tiempo_total: None,
            posicion,
        }
    }

    #[test]
    fn podium_orders_by_position() {
        let podium = Podium {
            podio: vec![team("b", Some(2)), team("a", Some(1)), team("c", Some(3))],
            otros: vec![team("x", None), team("d", Some(4))],
        }
        .ordered();

        let ids: Vec<&str> = podium.podio.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(podium.otros[0].id, "d");
        assert_eq!(podium.otros[1].id, "x");
    }

    #[test]
    fn podium_tolerates_missing_lists() {
        let podium: Podium = serde_json::from_str(r#"{"podio":[{"id":"t1","nombre":"A"}]}"#).unwrap();
        assert_eq!(podium.podio.len(), 1);
        assert!(podium.otros.is_empty());
    }

    #[test]
    fn prize_keeps_unknown_fields() {
        let prize: Prize = serde_json::from_str(
            r#"{"id":"pr1","disciplina":"Atletismo","categoria":"femenino","participante":{"nombre":"Eva"}}"#,
        )
        .unwrap();

        assert_eq!(prize.disciplina, Some(Discipline::Atletismo));
        assert_eq!(prize.details["categoria"], "femenino");

        let json = serde_json::to_value(&prize).unwrap();
        assert_eq!(json["disciplina"], "atletismo");
        assert_eq!(json["participante"]["nombre"], "Eva");
    }

    #[test]
    fn prizes_follow_race_order() {
        let mut prizes: Vec<Prize> = ["atletismo", "", "natacion", "ciclismo"]
            .iter()
            .map(|d| serde_json::from_value(serde_json::json!({ "disciplina": d })).unwrap())
            .collect();

        sort_prizes(&mut prizes);

        let order: Vec<Option<Discipline>> = prizes.iter().map(|p| p.disciplina).collect();
        assert_eq!(
            order,
            vec![
                Some(Discipline::Natacion),
                Some(Discipline::Ciclismo),
                Some(Discipline::Atletismo),
                Some(Discipline::Ninguno),
            ]
        );
    }
}
