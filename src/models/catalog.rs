//! Static exercise catalog for the 4-week plan.
//!
//! The table is compile-time data: identifiers are the stable keys entries
//! reference, templates hold the default per-set reps/seconds/meters the form
//! prefills. Declaration order is the canonical menu order.

/// A resolved catalog item.
///
/// Owned strings so that unknown/custom exercises can be synthesized on the
/// fly without a lifetime tied to the static table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Exercise {
    pub id: String,
    pub label: String,
    pub category: String,
    pub unit: String,
    pub template: Vec<String>,
}

struct Row {
    id: &'static str,
    label: &'static str,
    category: &'static str,
    unit: &'static str,
    template: &'static [&'static str],
}

const CATALOG: &[Row] = &[
    Row { id: "PMR1P", label: "Single-leg Romanian Deadlift", category: "Main 5x5", unit: "kg", template: &["5", "5", "5", "5", "5"] },
    Row { id: "SB5X5", label: "Bulgarian Split Squat", category: "Main 5x5", unit: "kg", template: &["5", "5", "5", "5", "5"] },
    Row { id: "HT", label: "Hip Thrust", category: "Secondary", unit: "kg", template: &["10", "10", "10"] },
    Row { id: "STEPUP", label: "High Step-up", category: "Secondary", unit: "kg", template: &["10", "10", "10"] },
    Row { id: "PG1P", label: "Single-leg Glute Bridge", category: "Secondary", unit: "kg", template: &["12", "12", "12"] },
    Row { id: "PALLOF", label: "Pallof Press", category: "Core", unit: "kg", template: &["15", "15", "15"] },
    Row { id: "DRAGPLANK", label: "Dragging Plank", category: "Core", unit: "s", template: &["40", "40", "40"] },
    Row { id: "BIRDDOG", label: "Bird Dog with Band", category: "Core", unit: "reps", template: &["12", "12", "12"] },
    Row { id: "NORDIC", label: "Eccentric Nordic Curl", category: "Hamstrings", unit: "reps", template: &["8", "8", "8"] },
    Row { id: "CLAMSHELL", label: "Clamshell with Band", category: "Glute Med", unit: "reps", template: &["15", "15", "15"] },
    Row { id: "SOLEO", label: "Seated Soleus Raise", category: "Calves", unit: "reps", template: &["20", "20", "20"] },
    Row { id: "CALF_EXC", label: "Eccentric Calf Raise", category: "Calves", unit: "reps", template: &["15", "15", "15"] },
    Row { id: "POGO", label: "Pogo Jumps", category: "Plyometrics", unit: "s", template: &["20", "20", "20"] },
    Row { id: "VERTICAL", label: "Vertical Jumps", category: "Plyometrics", unit: "reps", template: &["6", "6", "6"] },
    Row { id: "BOXJUMP", label: "Box Jumps", category: "Plyometrics", unit: "reps", template: &["5", "5", "5"] },
    Row { id: "SPLIT", label: "Split Jump", category: "Plyometrics", unit: "reps/leg", template: &["6", "6", "6"] },
    Row { id: "DROP", label: "Drop Jumps", category: "Plyometrics", unit: "reps", template: &["6", "6", "6"] },
    Row { id: "BOUNDING", label: "Bounding", category: "Plyometrics", unit: "m", template: &["20", "20", "20"] },
    Row { id: "HOPS", label: "Lateral Hops", category: "Plyometrics", unit: "s", template: &["20", "20", "20"] },
    Row { id: "SKIPPING", label: "Band Skipping", category: "Technique", unit: "m", template: &["20", "20", "20"] },
];

impl Row {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            id: self.id.to_string(),
            label: self.label.to_string(),
            category: self.category.to_string(),
            unit: self.unit.to_string(),
            template: self.template.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Resolves an exercise by identifier first, then by exact label.
///
/// Never fails: an unknown key yields a synthetic "Other" item whose id and
/// label are the key itself, so every entry has a displayable label even for
/// ad hoc exercises.
pub fn lookup(key: &str) -> Exercise {
    CATALOG
        .iter()
        .find(|r| r.id == key)
        .or_else(|| CATALOG.iter().find(|r| r.label == key))
        .map(Row::to_exercise)
        .unwrap_or_else(|| Exercise {
            id: key.to_string(),
            label: key.to_string(),
            category: "Other".to_string(),
            unit: String::new(),
            template: Vec::new(),
        })
}

/// Returns the catalog grouped by category, both levels in declaration order.
pub fn grouped_by_category() -> Vec<(String, Vec<Exercise>)> {
    let mut groups: Vec<(String, Vec<Exercise>)> = Vec::new();
    for row in CATALOG {
        match groups.iter_mut().find(|(cat, _)| cat == row.category) {
            Some((_, items)) => items.push(row.to_exercise()),
            None => groups.push((row.category.to_string(), vec![row.to_exercise()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let ex = lookup("PMR1P");
        assert_eq!(ex.id, "PMR1P");
        assert_eq!(ex.label, "Single-leg Romanian Deadlift");
        assert_eq!(ex.unit, "kg");
        assert_eq!(ex.template.len(), 5);
    }

    #[test]
    fn test_lookup_by_label() {
        let ex = lookup("Hip Thrust");
        assert_eq!(ex.id, "HT");
        assert_eq!(ex.label, "Hip Thrust");
    }

    #[test]
    fn test_lookup_unknown_is_synthetic() {
        let ex = lookup("Weighted Carry");
        assert_eq!(ex.id, "Weighted Carry");
        assert_eq!(ex.label, "Weighted Carry");
        assert_eq!(ex.category, "Other");
        assert!(ex.unit.is_empty());
        assert!(ex.template.is_empty());
    }

    #[test]
    fn test_every_id_resolves_to_itself() {
        for row in CATALOG {
            assert_eq!(lookup(row.id).id, row.id);
            assert_eq!(lookup(row.label).label, row.label);
        }
    }

    #[test]
    fn test_grouped_follows_declaration_order() {
        let groups = grouped_by_category();
        let categories: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Main 5x5",
                "Secondary",
                "Core",
                "Hamstrings",
                "Glute Med",
                "Calves",
                "Plyometrics",
                "Technique"
            ]
        );

        let (_, plyo) = &groups[6];
        let ids: Vec<&str> = plyo.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["POGO", "VERTICAL", "BOXJUMP", "SPLIT", "DROP", "BOUNDING", "HOPS"]
        );
    }
}
