use crate::error::{Result, TopologyError};
use crate::topology::{EdgeConditionId, EdgeId, TopologyStore};

/// Attaches a boundary/continuity condition to an edge.
pub struct SetEdgeCondition {
    condition: EdgeConditionId,
    edge: EdgeId,
    boundary: bool,
}

impl SetEdgeCondition {
    /// Creates a new `SetEdgeCondition` operation.
    #[must_use]
    pub fn new(condition: EdgeConditionId, edge: EdgeId, boundary: bool) -> Self {
        Self {
            condition,
            edge,
            boundary,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge already carries a different condition,
    /// or the condition is attached to another edge.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let attached = store.condition(self.condition)?.edge;
        let existing = store.edge(self.edge)?.condition;
        if existing.is_some_and(|c| c != self.condition)
            || attached.is_some_and(|e| e != self.edge)
        {
            return Err(TopologyError::ConditionConflict(self.edge).into());
        }

        store.edge_mut(self.edge)?.condition = Some(self.condition);
        let condition = store.condition_mut(self.condition)?;
        condition.edge = Some(self.edge);
        condition.boundary = self.boundary;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{EdgeConditionData, EdgeData};

    #[test]
    fn flags_edge_as_boundary() {
        let mut store = TopologyStore::new();
        let edge = store.add_edge(EdgeData::new());
        let condition = store.add_condition(EdgeConditionData::new());
        assert!(!store.edge_is_boundary(edge).unwrap());

        SetEdgeCondition::new(condition, edge, true)
            .execute(&mut store)
            .unwrap();
        assert!(store.edge_is_boundary(edge).unwrap());
    }

    #[test]
    fn one_condition_per_edge() {
        let mut store = TopologyStore::new();
        let edge = store.add_edge(EdgeData::new());
        let first = store.add_condition(EdgeConditionData::new());
        let second = store.add_condition(EdgeConditionData::new());
        SetEdgeCondition::new(first, edge, true)
            .execute(&mut store)
            .unwrap();
        assert!(SetEdgeCondition::new(second, edge, true)
            .execute(&mut store)
            .is_err());
    }
}
