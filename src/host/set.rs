// BlockSet - the live blocks of one design, in design order
//
// Owns every block instance plus the sender side of the event channel. All
// host calls funnel through `call`, which is also where failures get logged
// and turned into CallFailed events.

use serde_json::{Map, Value};
use tokio::sync::mpsc;

use super::design::Design;
use super::queue::HostCall;
use super::registry::{BlockContext, BlockRegistry};
use super::{Block, CallError, Signals};
use crate::events::WidgetEvent;

pub struct BlockSet {
    blocks: Vec<(String, Box<dyn Block>)>,
    events: mpsc::UnboundedSender<WidgetEvent>,
}

impl BlockSet {
    pub fn new(events: mpsc::UnboundedSender<WidgetEvent>) -> Self {
        Self {
            blocks: Vec::new(),
            events,
        }
    }

    /// Instantiate every block of a design and apply its params
    ///
    /// Unknown paths, bad factory arguments and duplicate ids abort the
    /// build. A param whose setter fails is logged and skipped.
    pub fn build(
        registry: &BlockRegistry,
        design: &Design,
        events: mpsc::UnboundedSender<WidgetEvent>,
    ) -> Result<Self, CallError> {
        let mut set = Self::new(events);

        for spec in &design.blocks {
            let entry = registry
                .get(&spec.path)
                .ok_or_else(|| CallError::UnknownPath(spec.path.clone()))?;

            let block = registry.make(
                &spec.path,
                BlockContext {
                    id: &spec.id,
                    args: &spec.args,
                    signals: set.signals(&spec.id),
                },
            )?;
            set.insert(&spec.id, block)?;

            for unknown in spec
                .params
                .keys()
                .filter(|param| !entry.setters.iter().any(|s| s.param == param.as_str()))
            {
                tracing::warn!(block = %spec.id, param = %unknown, "ignoring unknown design param");
            }

            for setter in entry.setters {
                if let Some(value) = spec.params.get(setter.param) {
                    // Failures are already logged by `call`
                    let _ = set.call(&HostCall::new(&spec.id, setter.method, vec![value.clone()]));
                }
            }
        }

        tracing::info!(blocks = set.len(), "design loaded");
        Ok(set)
    }

    /// Signal port for a block id, wired to this set's event channel
    pub fn signals(&self, id: &str) -> Signals {
        Signals::new(id, self.events.clone())
    }

    pub fn insert(&mut self, id: &str, block: Box<dyn Block>) -> Result<(), CallError> {
        if self.get(id).is_some() {
            return Err(CallError::DuplicateId(id.to_string()));
        }
        self.blocks.push((id.to_string(), block));
        Ok(())
    }

    /// Apply one host call
    ///
    /// Results are also reported on the event channel: a `Reply` for calls
    /// that return a value, a logged `CallFailed` for errors. Callers that
    /// don't care can drop the returned result.
    pub fn call(&mut self, call: &HostCall) -> Result<Value, CallError> {
        let result = match self.get_mut(&call.block) {
            Some(block) => block.call(&call.method, &call.args),
            None => Err(CallError::UnknownBlock(call.block.clone())),
        };

        match &result {
            Ok(value) => {
                tracing::debug!(block = %call.block, method = %call.method, "call applied");
                if !value.is_null() {
                    let _ = self.events.send(WidgetEvent::reply(
                        &call.block,
                        &call.method,
                        value.clone(),
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(block = %call.block, method = %call.method, "call failed: {}", e);
                let _ = self.events.send(WidgetEvent::call_failed(
                    &call.block,
                    &call.method,
                    e.to_string(),
                ));
            }
        }
        result
    }

    pub fn get(&self, id: &str) -> Option<&dyn Block> {
        self.blocks
            .iter()
            .find(|(block_id, _)| block_id == id)
            .map(|(_, block)| block.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Block + 'static)> {
        self.blocks
            .iter_mut()
            .find(|(block_id, _)| block_id == id)
            .map(|(_, block)| block.as_mut())
    }

    /// Block at a display position
    pub fn at_mut(&mut self, index: usize) -> Option<&mut (dyn Block + 'static)> {
        self.blocks.get_mut(index).map(|(_, block)| block.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Block)> {
        self.blocks
            .iter()
            .map(|(id, block)| (id.as_str(), block.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Have every block emit its current value
    pub fn activate_all(&mut self) {
        for (_, block) in &mut self.blocks {
            block.activate();
        }
    }

    pub fn save_states(&self) -> Map<String, Value> {
        self.blocks
            .iter()
            .map(|(id, block)| (id.clone(), block.save_state()))
            .collect()
    }

    /// Restore saved states by block id
    ///
    /// Ids missing from the design are skipped; a state a block refuses is
    /// logged and left alone.
    pub fn restore_states(&mut self, states: &Map<String, Value>) {
        for (id, state) in states {
            match self.get_mut(id) {
                Some(block) => {
                    if let Err(e) = block.restore_state(state) {
                        tracing::warn!(block = %id, path = block.path(), "state not restored: {}", e);
                    }
                }
                None => tracing::debug!(block = %id, "saved state for unknown block"),
            }
        }
    }
}
