use serde::Serialize;
use std::collections::HashMap;

use super::race_time;
use crate::domain::participant::value_objects::fold;
use crate::domain::participant::ParticipantRecord;
use crate::domain::team::TeamRecord;

/// Team name shown for participants without a team
pub const NO_TEAM: &str = "Sin equipo";

/// Participant row with its team name resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    #[serde(flatten)]
    pub participant: ParticipantRecord,
    pub equipo_nombre: String,
}

/// Joins participants with the name of their team
pub fn with_team_names(participants: Vec<ParticipantRecord>, teams: &[TeamRecord]) -> Vec<Standing> {
    let names: HashMap<&str, &str> = teams
        .iter()
        .map(|t| (t.id.as_str(), t.nombre.as_str()))
        .collect();

    participants
        .into_iter()
        .map(|participant| {
            let equipo_nombre = participant
                .equipo_id
                .as_deref()
                .and_then(|id| names.get(id))
                .unwrap_or(&NO_TEAM)
                .to_string();
            Standing {
                participant,
                equipo_nombre,
            }
        })
        .collect()
}

/// Sorts a discipline's results, fastest first
pub fn rank_by_time(standings: &mut [Standing]) {
    standings.sort_by(|a, b| {
        race_time::compare(
            a.participant.tiempo.as_deref(),
            b.participant.tiempo.as_deref(),
        )
    });
}

/// Sorts a team's participants natación, ciclismo, atletismo
///
/// Participants without a known discipline come first.
pub fn order_by_discipline(participants: &mut [ParticipantRecord]) {
    participants.sort_by_key(|p| {
        p.disciplina
            .and_then(|d| d.race_position())
            .map_or(-1, |i| i as i64)
    });
}

/// Sorts the roster alphabetically by participant name
pub fn sort_by_name(standings: &mut [Standing]) {
    standings.sort_by(|a, b| fold(&a.participant.nombre).cmp(&fold(&b.participant.nombre)));
}

/// Keeps rows whose participant or team name contains `term`
///
/// Matching is case-insensitive; a blank term keeps everything.
pub fn filter(standings: Vec<Standing>, term: &str) -> Vec<Standing> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return standings;
    }

    standings
        .into_iter()
        .filter(|s| {
            s.participant.nombre.to_lowercase().contains(&term)
                || s.equipo_nombre.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::Discipline;

    fn record(name: &str, team: Option<&str>, time: Option<&str>) -> ParticipantRecord {
        ParticipantRecord {
            id: Some(format!("id-{}", name)),
            nombre: name.to_string(),
            correo: None,
            genero: None,
            disciplina: None,
            delegado: false,
            tiempo: time.map(str::to_string),
            penalizado: false,
            premio_especial: false,
            equipo_id: team.map(str::to_string),
        }
    }

    fn teams() -> Vec<TeamRecord> {
        vec![TeamRecord {
            id: "t1".to_string(),
            nombre: "Aguilas".to_string(),
            tiempo_total: None,
            posicion: None,
        }]
    }

    #[test]
    fn team_names_resolved_or_defaulted() {
        let rows = with_team_names(
            vec![
                record("Ana", Some("t1"), None),
                record("Beto", None, None),
                record("Caro", Some("gone"), None),
            ],
            &teams(),
        );

        let names: Vec<_> = rows.iter().map(|r| r.equipo_nombre.as_str()).collect();
        assert_eq!(names, vec!["Aguilas", NO_TEAM, NO_TEAM]);
    }

    #[test]
    fn ranking_puts_missing_and_zero_last() {
        let mut rows = with_team_names(
            vec![
                record("zero", None, Some("00:00:00")),
                record("slow", None, Some("01:10:00")),
                record("none", None, None),
                record("fast", None, Some("00:58:12.300")),
            ],
            &[],
        );
        rank_by_time(&mut rows);

        let order: Vec<_> = rows.iter().map(|r| r.participant.nombre.as_str()).collect();
        assert_eq!(order, vec!["fast", "slow", "none", "zero"]);
    }

    #[test]
    fn discipline_order() {
        let mut people = vec![
            record("run", None, None),
            record("swim", None, None),
            record("bike", None, None),
        ];
        people[0].disciplina = Some(Discipline::Atletismo);
        people[1].disciplina = Some(Discipline::Natacion);
        people[2].disciplina = Some(Discipline::Ciclismo);

        order_by_discipline(&mut people);
        let order: Vec<_> = people.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(order, vec!["swim", "bike", "run"]);
    }

    #[test]
    fn roster_sorted_ignoring_accents() {
        let mut rows = with_team_names(
            vec![
                record("Óscar", None, None),
                record("Nadia", None, None),
                record("andrés", None, None),
            ],
            &[],
        );
        sort_by_name(&mut rows);

        let order: Vec<_> = rows.iter().map(|r| r.participant.nombre.as_str()).collect();
        assert_eq!(order, vec!["andrés", "Nadia", "Óscar"]);
    }

    #[test]
    fn filter_matches_participant_or_team() {
        let rows = with_team_names(
            vec![record("Ana", Some("t1"), None), record("Beto", None, None)],
            &teams(),
        );

        assert_eq!(filter(rows.clone(), "AGUI").len(), 1);
        assert_eq!(filter(rows.clone(), "bet").len(), 1);
        assert_eq!(filter(rows, "  ").len(), 2);
    }

    #[test]
    fn standing_serializes_flat() {
        let rows = with_team_names(vec![record("Ana", Some("t1"), Some("00:40:00"))], &teams());
        let json = serde_json::to_value(&rows[0]).unwrap();

        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["equipo_nombre"], "Aguilas");
        assert_eq!(json["tiempo"], "00:40:00");
    }
}
