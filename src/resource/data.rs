// Copyright 2025 Snowflake UDF Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource state handed to lifecycle operations

/// Persisted id plus the prior and planned field sets of one resource.
///
/// An empty id means the object does not exist (never created, deleted, or
/// found missing on read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceData<D> {
    id: String,
    prior: Option<D>,
    planned: D,
}

impl<D: Clone> ResourceData<D> {
    /// Data for an object about to be created
    pub fn new(planned: D) -> Self {
        Self {
            id: String::new(),
            prior: None,
            planned,
        }
    }

    /// Data for an existing object whose applied state is `state`
    pub fn from_state(id: impl Into<String>, state: D) -> Self {
        Self {
            id: id.into(),
            prior: Some(state.clone()),
            planned: state,
        }
    }

    /// Replace the planned field set, keeping the current one as prior
    pub fn plan(&mut self, planned: D) {
        let current = std::mem::replace(&mut self.planned, planned);
        self.prior.get_or_insert(current);
    }

    /// Accept the planned field set as the new applied state
    pub fn commit(&mut self) {
        self.prior = Some(self.planned.clone());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    /// The planned field set
    pub fn get(&self) -> &D {
        &self.planned
    }

    /// Mutable access to the planned field set, used by read-back
    pub fn get_mut(&mut self) -> &mut D {
        &mut self.planned
    }

    pub fn prior(&self) -> Option<&D> {
        self.prior.as_ref()
    }

    /// Whether the field selected by `field` differs between prior and
    /// planned. Without a prior there is no applied state to differ from, so
    /// nothing counts as changed.
    pub fn has_change<T, F>(&self, field: F) -> bool
    where
        T: PartialEq + ?Sized,
        F: Fn(&D) -> &T,
    {
        match &self.prior {
            Some(prior) => field(prior) != field(&self.planned),
            None => false,
        }
    }
}
