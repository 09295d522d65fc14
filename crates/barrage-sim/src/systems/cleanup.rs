//! Post-prune bookkeeping: structure rosters and defeat detection.

use barrage_core::enums::EntityKind;
use barrage_core::events::AudioEvent;

use crate::context::Rosters;
use crate::entity_manager::Pruned;

/// Drop pruned cities and turrets from the rosters and report each loss.
/// Returns true if this prune left both rosters empty.
pub fn run(pruned: &[Pruned], rosters: &mut Rosters, audio_events: &mut Vec<AudioEvent>) -> bool {
    let mut lost_any = false;
    for record in pruned {
        if !matches!(record.kind, EntityKind::City | EntityKind::Turret) {
            continue;
        }
        if !rosters.remove(record.entity) {
            continue;
        }
        lost_any = true;
        let position = record.position.unwrap_or_default();
        tracing::debug!(
            kind = ?record.kind,
            cities = rosters.cities.len(),
            turrets = rosters.turrets.len(),
            "Structure destroyed"
        );
        audio_events.push(AudioEvent::StructureLost {
            kind: record.kind,
            x: position.x,
            y: position.y,
        });
    }
    lost_any && rosters.is_defeated()
}
