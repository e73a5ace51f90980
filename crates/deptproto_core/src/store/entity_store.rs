use super::error::{EntityRef, StoreError, StoreResult, ValidationError};
use super::input::{DepartmentPatch, NewProtocol, ProtocolPatch};
use crate::graph::{self, EdgeChange, RelationshipGraph};
use crate::model::protocol::{normalize_items, normalize_tag_items};
use crate::model::{
    normalize_list, normalize_tags, Department, DepartmentId, IdSpace, Protocol, ProtocolId,
    Snapshot, SnapshotIssue,
};
use crate::persist::{KeyValueStore, PersistError, PersistenceAdapter};
use crate::search::filter::{run_query, ProtocolQuery};
use log::{error, info};

/// Live department/protocol collections bound to a persistence adapter.
pub struct EntityStore<S: KeyValueStore> {
    persistence: PersistenceAdapter<S>,
    state: Snapshot,
    next_department_id: DepartmentId,
    next_protocol_id: ProtocolId,
}

impl<S: KeyValueStore> EntityStore<S> {
    /// Loads persisted state, falling back to `seed` when none is usable.
    ///
    /// # Errors
    /// Returns `StoreError::Persist` when the backend cannot be read or the
    /// seed cannot be written, and `StoreError::Validation` when the seed
    /// fails its integrity check. Corrupt records are recovered, not
    /// returned.
    pub fn open(mut persistence: PersistenceAdapter<S>, seed: &Snapshot) -> StoreResult<Self> {
        seed.check_integrity().map_err(ValidationError::InvalidSnapshot)?;
        let state = persistence.load_or_seed(seed)?;
        let (next_department_id, next_protocol_id) = id_counters(&state)?;
        info!(
            "event=store_open module=store status=ok departments={} protocols={}",
            state.departments.len(),
            state.protocols.len()
        );
        Ok(Self {
            persistence,
            next_department_id,
            next_protocol_id,
            state,
        })
    }

    pub fn departments(&self) -> &[Department] {
        &self.state.departments
    }

    pub fn protocols(&self) -> &[Protocol] {
        &self.state.protocols
    }

    pub fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.state.department(id)
    }

    pub fn protocol(&self, id: ProtocolId) -> Option<&Protocol> {
        self.state.protocol(id)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    pub fn graph(&self) -> RelationshipGraph<'_> {
        RelationshipGraph::new(&self.state.departments)
    }

    /// Resolved neighbors of `id`; empty when `id` is unknown.
    pub fn neighbors(&self, id: DepartmentId) -> Vec<&Department> {
        self.graph().neighbors(id)
    }

    /// Visible protocols for the caller's current filter state.
    pub fn search(&self, query: &ProtocolQuery) -> Vec<&Protocol> {
        run_query(&self.state.protocols, query)
    }

    pub fn create_department(&mut self, name: &str) -> StoreResult<Department> {
        let name = required_text(name, ValidationError::EmptyDepartmentName)?;
        let department = Department::new(self.allocate_department_id()?, name);

        let mut next = self.state.clone();
        next.departments.push(department.clone());
        self.commit(next, "department_create")?;

        info!(
            "event=department_create module=store status=ok department_id={}",
            department.id
        );
        Ok(department)
    }

    /// Merges `patch` into department `id`.
    ///
    /// A provided name must be non-blank. Connections are replaced as given;
    /// use [`Self::toggle_edge`] to keep edges symmetric.
    pub fn update_department(
        &mut self,
        id: DepartmentId,
        patch: DepartmentPatch,
    ) -> StoreResult<()> {
        let mut next = self.state.clone();
        let department = next
            .departments
            .iter_mut()
            .find(|dept| dept.id == id)
            .ok_or(StoreError::NotFound(EntityRef::Department(id)))?;

        if let Some(name) = patch.name {
            department.name = required_text(&name, ValidationError::EmptyDepartmentName)?;
        }
        if let Some(connections) = patch.connections {
            department.connections = connections;
        }

        self.commit(next, "department_update")?;
        info!("event=department_update module=store status=ok department_id={id}");
        Ok(())
    }

    /// Deletes department `id`, its edges, and every protocol it owns.
    pub fn delete_department(&mut self, id: DepartmentId) -> StoreResult<()> {
        if !self.state.contains_department(id) {
            return Err(StoreError::NotFound(EntityRef::Department(id)));
        }

        let mut next = self.state.clone();
        next.departments.retain(|dept| dept.id != id);
        let detached = graph::detach_department(&mut next.departments, id);
        let protocols_before = next.protocols.len();
        next.protocols.retain(|protocol| protocol.department_id != id);
        let cascaded = protocols_before - next.protocols.len();

        self.commit(next, "department_delete")?;
        info!(
            "event=department_delete module=store status=ok department_id={} detached_edges={} cascaded_protocols={}",
            id, detached, cascaded
        );
        Ok(())
    }

    /// Adds or removes the undirected edge `a ↔ b`.
    pub fn toggle_edge(&mut self, a: DepartmentId, b: DepartmentId) -> StoreResult<EdgeChange> {
        let mut next = self.state.clone();
        let change = graph::toggle_edge(&mut next.departments, a, b)?;

        self.commit(next, "edge_toggle")?;
        info!(
            "event=edge_toggle module=store status=ok from={} to={} change={:?}",
            a, b, change
        );
        Ok(change)
    }

    pub fn create_protocol(&mut self, fields: NewProtocol) -> StoreResult<Protocol> {
        let title = required_text(&fields.title, ValidationError::EmptyProtocolTitle)?;
        self.ensure_department(fields.department_id)?;

        let protocol = Protocol {
            id: self.allocate_protocol_id()?,
            title,
            summary: fields.summary.trim().to_string(),
            steps: normalize_list(&fields.steps),
            tags: normalize_tags(&fields.tags),
            department_id: fields.department_id,
        };

        let mut next = self.state.clone();
        next.protocols.push(protocol.clone());
        self.commit(next, "protocol_create")?;

        info!(
            "event=protocol_create module=store status=ok protocol_id={} department_id={} steps={} tags={}",
            protocol.id,
            protocol.department_id,
            protocol.steps.len(),
            protocol.tags.len()
        );
        Ok(protocol)
    }

    /// Merges `patch` into protocol `id`; `steps`/`tags` replace wholesale.
    pub fn update_protocol(&mut self, id: ProtocolId, patch: ProtocolPatch) -> StoreResult<()> {
        if self.state.protocol(id).is_none() {
            return Err(StoreError::NotFound(EntityRef::Protocol(id)));
        }
        if let Some(department_id) = patch.department_id {
            self.ensure_department(department_id)?;
        }

        let mut next = self.state.clone();
        let protocol = next
            .protocols
            .iter_mut()
            .find(|protocol| protocol.id == id)
            .ok_or(StoreError::NotFound(EntityRef::Protocol(id)))?;

        if let Some(title) = patch.title {
            protocol.title = required_text(&title, ValidationError::EmptyProtocolTitle)?;
        }
        if let Some(summary) = patch.summary {
            protocol.summary = summary.trim().to_string();
        }
        if let Some(steps) = patch.steps {
            protocol.steps = normalize_items(&steps);
        }
        if let Some(tags) = patch.tags {
            protocol.tags = normalize_tag_items(&tags);
        }
        if let Some(department_id) = patch.department_id {
            protocol.department_id = department_id;
        }

        self.commit(next, "protocol_update")?;
        info!("event=protocol_update module=store status=ok protocol_id={id}");
        Ok(())
    }

    /// Deletes protocol `id`. Unknown ids are a no-op and write nothing.
    pub fn delete_protocol(&mut self, id: ProtocolId) -> StoreResult<()> {
        if self.state.protocol(id).is_none() {
            info!("event=protocol_delete module=store status=noop protocol_id={id}");
            return Ok(());
        }

        let mut next = self.state.clone();
        next.protocols.retain(|protocol| protocol.id != id);
        self.commit(next, "protocol_delete")?;
        info!("event=protocol_delete module=store status=ok protocol_id={id}");
        Ok(())
    }

    /// Replaces both collections with `seed` and persists immediately.
    ///
    /// Id counters never move backwards, so ids handed out before the reset
    /// are not reissued.
    pub fn reset(&mut self, seed: &Snapshot) -> StoreResult<()> {
        seed.check_integrity().map_err(ValidationError::InvalidSnapshot)?;
        let mut next = seed.clone();
        graph::prune_dangling(&mut next.departments);

        let (seed_department_id, seed_protocol_id) = id_counters(&next)?;
        let next_department_id = self.next_department_id.max(seed_department_id);
        let next_protocol_id = self.next_protocol_id.max(seed_protocol_id);

        self.persistence.reset_to_seed(&next).map_err(|err| {
            log_commit_failure("store_reset", &err);
            err
        })?;
        self.state = next;
        self.next_department_id = next_department_id;
        self.next_protocol_id = next_protocol_id;
        Ok(())
    }

    fn commit(&mut self, next: Snapshot, event: &'static str) -> StoreResult<()> {
        match self.persistence.save(&next) {
            Ok(()) => {
                self.state = next;
                Ok(())
            }
            Err(err) => {
                log_commit_failure(event, &err);
                Err(err.into())
            }
        }
    }

    fn ensure_department(&self, id: DepartmentId) -> StoreResult<()> {
        if self.state.contains_department(id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownDepartment(id).into())
        }
    }

    /// Hands out the next department id. `i64::MAX` is never assigned, so
    /// every saved snapshot can be loaded again.
    fn allocate_department_id(&mut self) -> StoreResult<DepartmentId> {
        let id = self.next_department_id;
        self.next_department_id = advance(id, IdSpace::Department)?;
        Ok(id)
    }

    fn allocate_protocol_id(&mut self) -> StoreResult<ProtocolId> {
        let id = self.next_protocol_id;
        self.next_protocol_id = advance(id, IdSpace::Protocol)?;
        Ok(id)
    }
}

fn advance(id: i64, space: IdSpace) -> StoreResult<i64> {
    id.checked_add(1).ok_or_else(|| {
        error!(
            "event=id_allocate module=store status=error error_code=id_space_exhausted space={space}"
        );
        StoreError::IdSpaceExhausted(space)
    })
}

fn id_counters(state: &Snapshot) -> StoreResult<(DepartmentId, ProtocolId)> {
    let exhausted = |space| {
        StoreError::from(ValidationError::InvalidSnapshot(
            SnapshotIssue::IdSpaceExhausted(space),
        ))
    };
    let department = state
        .next_department_id()
        .ok_or_else(|| exhausted(IdSpace::Department))?;
    let protocol = state
        .next_protocol_id()
        .ok_or_else(|| exhausted(IdSpace::Protocol))?;
    Ok((department, protocol))
}

fn required_text(value: &str, empty: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(empty)
    } else {
        Ok(trimmed.to_string())
    }
}

fn log_commit_failure(event: &str, err: &PersistError) {
    error!("event={event} module=store status=error error_code=persist_failed error={err}");
}

#[cfg(test)]
mod tests {
    use super::required_text;
    use crate::store::ValidationError;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            required_text("  Legal ", ValidationError::EmptyDepartmentName).unwrap(),
            "Legal"
        );
        assert_eq!(
            required_text(" \t", ValidationError::EmptyDepartmentName),
            Err(ValidationError::EmptyDepartmentName)
        );
    }
}
