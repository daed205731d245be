//! The node arena: exclusive owner of every condition of one configuration.
//!
//! Nodes are addressed by dense index. Everything outside the arena, from
//! combination parents to aggregators, refers to a node by index only.

use std::collections::{BTreeSet, HashMap};

use condgraph_foundation::{ConditionState, Error, ErrorKind, Result};

use crate::config::{ArenaOptions, ConditionDescriptor};
use crate::init::Initializer;
use crate::node::ConditionNode;

/// Index-addressed collection of all condition nodes of one configuration.
#[derive(Clone, Debug, Default)]
pub struct ConditionArena {
    pub(crate) nodes: Vec<ConditionNode>,
    name_index: HashMap<String, usize>,
    /// Dependencies-first order established by the initializer.
    pub(crate) order: Vec<usize>,
    options: ArenaOptions,
}

impl ConditionArena {
    /// Creates uninitialized nodes for the descriptors, in order.
    ///
    /// # Errors
    /// Returns an error if two descriptors share a name.
    pub fn new(descriptors: &[ConditionDescriptor], options: ArenaOptions) -> Result<Self> {
        let mut nodes = Vec::with_capacity(descriptors.len());
        let mut name_index = HashMap::with_capacity(descriptors.len());

        for (index, desc) in descriptors.iter().enumerate() {
            if name_index.insert(desc.name.clone(), index).is_some() {
                log::warn!("duplicate condition {}", desc.name);
                return Err(Error::new(ErrorKind::DuplicateCondition(desc.name.clone())));
            }
            nodes.push(ConditionNode::new(desc.name.clone(), index));
        }

        Ok(Self {
            nodes,
            name_index,
            order: Vec::new(),
            options,
        })
    }

    /// Creates uninitialized nodes with default options.
    ///
    /// # Errors
    /// Returns an error if two descriptors share a name.
    pub fn from_descriptors(descriptors: &[ConditionDescriptor]) -> Result<Self> {
        Self::new(descriptors, ArenaOptions::default())
    }

    /// Creates and initializes an arena in one step.
    ///
    /// # Errors
    /// Returns an error if construction or initialization fails; the caller
    /// gets no arena at all in that case.
    pub fn build(
        descriptors: &[ConditionDescriptor],
        matcher_index: &HashMap<String, usize>,
        options: ArenaOptions,
    ) -> Result<Self> {
        let mut arena = Self::new(descriptors, options)?;
        arena.initialize(descriptors, matcher_index)?;
        Ok(arena)
    }

    /// Resolves every node against the descriptors and matcher names.
    ///
    /// Re-initializing starts from scratch. Slice state is discarded; the
    /// sliced flags are kept.
    ///
    /// # Errors
    /// Returns an error on unresolved names, cycles, duplicate indices, or
    /// malformed descriptors. No node is initialized afterwards.
    pub fn initialize(
        &mut self,
        descriptors: &[ConditionDescriptor],
        matcher_index: &HashMap<String, usize>,
    ) -> Result<()> {
        for node in &mut self.nodes {
            node.reset();
        }
        self.order.clear();

        let initializer =
            Initializer::new(descriptors, &self.name_index, matcher_index, &self.options);
        self.order = initializer.run(&mut self.nodes)?;

        log::debug!("initialized {} conditions", self.nodes.len());
        Ok(())
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if every node is initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.nodes.iter().all(ConditionNode::is_initialized)
    }

    /// Returns the node at an index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ConditionNode> {
        self.nodes.get(index)
    }

    /// Returns the node at an index.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    #[must_use]
    pub fn node(&self, index: usize) -> &ConditionNode {
        &self.nodes[index]
    }

    /// Returns all nodes in index order.
    #[must_use]
    pub fn nodes(&self) -> &[ConditionNode] {
        &self.nodes
    }

    /// Returns the index of a named condition.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Returns the condition name to index map.
    #[must_use]
    pub fn name_index(&self) -> &HashMap<String, usize> {
        &self.name_index
    }

    /// Returns the order nodes are evaluated in.
    #[must_use]
    pub fn evaluation_order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the options the arena was built with.
    #[must_use]
    pub fn options(&self) -> &ArenaOptions {
        &self.options
    }

    /// Returns the aggregate state of a node.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    #[must_use]
    pub fn is_condition_met(&self, index: usize) -> ConditionState {
        self.nodes[index].is_condition_met()
    }

    /// Returns the transitive matcher indices of a node.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    #[must_use]
    pub fn used_matcher_indices(&self, index: usize) -> &BTreeSet<usize> {
        self.nodes[index].used_matcher_indices()
    }

    /// Marks a node sliced. Marking true also marks every node it depends on.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn set_sliced(&mut self, index: usize, sliced: bool) {
        self.nodes[index].set_sliced(sliced);
        if !sliced {
            return;
        }

        let mut pending: Vec<usize> = self.nodes[index].children().to_vec();
        while let Some(child) = pending.pop() {
            let node = &mut self.nodes[child];
            if node.is_sliced() {
                continue;
            }
            node.set_sliced(true);
            pending.extend_from_slice(node.children());
        }
    }
}
