//! One-time resolution of condition descriptors into an evaluable DAG.
//!
//! The initializer walks the descriptors depth-first. Each node is marked
//! "on path" while its dependencies are being resolved; reaching a marked
//! node again means the configuration contains a cycle. Nodes are finished
//! in post-order, which is recorded as the evaluation order: every node
//! appears after all of its dependencies.
//!
//! Initialization is all or nothing. Any failure resets every node.

use std::collections::{BTreeSet, HashMap};

use condgraph_foundation::{Error, ErrorKind, Result};

use crate::combination::{CombinationCondition, combine};
use crate::config::{
    ArenaOptions, ConditionDescriptor, ConditionSpec, LogicalOperation, SimpleConditionConfig,
};
use crate::node::{ConditionNode, NodeKind};
use crate::simple::SimpleCondition;

// =============================================================================
// Init Context
// =============================================================================

/// Scratch state for one initialization run.
#[derive(Clone, Debug)]
pub struct InitContext {
    /// Nodes on the current DFS path.
    on_path: Vec<bool>,
    /// Finished nodes, dependencies first.
    order: Vec<usize>,
}

impl InitContext {
    /// Creates a context for an arena of `len` nodes.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            on_path: vec![false; len],
            order: Vec::with_capacity(len),
        }
    }

    /// Returns the evaluation order collected so far.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the context, returning the evaluation order.
    #[must_use]
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

// =============================================================================
// Initializer
// =============================================================================

/// Resolves names to indices, detects cycles, and computes matcher sets.
pub struct Initializer<'a> {
    descriptors: &'a [ConditionDescriptor],
    condition_index: &'a HashMap<String, usize>,
    matcher_index: &'a HashMap<String, usize>,
    options: &'a ArenaOptions,
}

impl<'a> Initializer<'a> {
    /// Creates an initializer over the given descriptors and name maps.
    #[must_use]
    pub fn new(
        descriptors: &'a [ConditionDescriptor],
        condition_index: &'a HashMap<String, usize>,
        matcher_index: &'a HashMap<String, usize>,
        options: &'a ArenaOptions,
    ) -> Self {
        Self {
            descriptors,
            condition_index,
            matcher_index,
            options,
        }
    }

    /// Initializes every node, returning the evaluation order.
    ///
    /// # Errors
    /// Returns an error if a name does not resolve, the graph has a cycle,
    /// indices are duplicated, or a descriptor is malformed. On error no
    /// node is left initialized.
    pub fn run(&self, nodes: &mut [ConditionNode]) -> Result<Vec<usize>> {
        let mut ctx = InitContext::new(nodes.len());
        match self.run_with(nodes, &mut ctx) {
            Ok(()) => Ok(ctx.into_order()),
            Err(err) => {
                log::warn!("condition initialization failed: {err}");
                for node in nodes.iter_mut() {
                    node.reset();
                }
                Err(err)
            }
        }
    }

    /// Initializes every node using a caller-supplied context.
    ///
    /// Unlike [`run`](Self::run), this does not reset nodes on failure.
    /// Nodes finished before the failure stay initialized and in the
    /// context's order; the path markers are always cleared, so the context
    /// can be reused.
    ///
    /// # Errors
    /// See [`run`](Self::run). Also fails if the context was not sized for
    /// `nodes`.
    pub fn run_with(&self, nodes: &mut [ConditionNode], ctx: &mut InitContext) -> Result<()> {
        if ctx.on_path.len() != nodes.len() {
            return Err(Error::new(ErrorKind::DescriptorMismatch {
                expected: nodes.len(),
                actual: ctx.on_path.len(),
            }));
        }
        self.check_layout(nodes)?;

        let result = (0..nodes.len()).try_for_each(|index| self.init_node(index, nodes, ctx));
        if result.is_err() {
            ctx.on_path.fill(false);
        }
        result
    }

    fn check_layout(&self, nodes: &[ConditionNode]) -> Result<()> {
        if self.descriptors.len() != nodes.len() {
            return Err(Error::new(ErrorKind::DescriptorMismatch {
                expected: nodes.len(),
                actual: self.descriptors.len(),
            }));
        }

        for (slot, (node, desc)) in nodes.iter().zip(self.descriptors).enumerate() {
            if node.name() != desc.name {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "node {} at slot {slot} does not match descriptor {}",
                    node.name(),
                    desc.name
                ))));
            }
            if node.index() != slot || self.condition_index.get(&desc.name) != Some(&slot) {
                return Err(Error::new(ErrorKind::DuplicateCondition(desc.name.clone())));
            }
        }
        Ok(())
    }

    fn init_node(
        &self,
        index: usize,
        nodes: &mut [ConditionNode],
        ctx: &mut InitContext,
    ) -> Result<()> {
        if nodes[index].initialized {
            return Ok(());
        }

        let desc = &self.descriptors[index];
        ctx.on_path[index] = true;

        let (kind, used) = match &desc.spec {
            ConditionSpec::Simple(config) => self.resolve_simple(&desc.name, config)?,
            ConditionSpec::Combination {
                operation,
                children,
            } => self.resolve_combination(&desc.name, *operation, children, nodes, ctx)?,
        };

        let aggregate = match &kind {
            NodeKind::Simple(simple) => simple.initial_state(),
            NodeKind::Combination(combination) => combine(
                combination.operation(),
                combination.children().iter().map(|&child| nodes[child].aggregate),
            ),
            NodeKind::Pending => unreachable!("resolution always yields a rule"),
        };

        let node = &mut nodes[index];
        node.aggregate = aggregate;
        node.kind = kind;
        node.used_matchers = used;
        node.initialized = true;

        ctx.on_path[index] = false;
        ctx.order.push(index);
        log::trace!("initialized condition {} at {index}", desc.name);
        Ok(())
    }

    fn resolve_matcher(&self, condition: &str, matcher: Option<&String>) -> Result<Option<usize>> {
        matcher
            .map(|name| {
                self.matcher_index.get(name).copied().ok_or_else(|| {
                    log::warn!("condition {condition} references unknown matcher {name}");
                    Error::unknown_matcher(name.clone()).with_frame(condition)
                })
            })
            .transpose()
    }

    fn resolve_simple(
        &self,
        name: &str,
        config: &SimpleConditionConfig,
    ) -> Result<(NodeKind, BTreeSet<usize>)> {
        if config.start.is_none() && config.stop_all.is_none() {
            return Err(Error::invalid_condition(
                name,
                "needs a start or stop_all matcher",
            ));
        }

        let simple = SimpleCondition::new(
            self.resolve_matcher(name, config.start.as_ref())?,
            self.resolve_matcher(name, config.stop.as_ref())?,
            self.resolve_matcher(name, config.stop_all.as_ref())?,
            config.count_nesting,
            config.dimensions.clone(),
            config.initial_value,
            self.options.max_slices,
        );
        let used = simple.matcher_indices().collect();
        Ok((NodeKind::Simple(simple), used))
    }

    fn resolve_combination(
        &self,
        name: &str,
        operation: LogicalOperation,
        children: &[String],
        nodes: &mut [ConditionNode],
        ctx: &mut InitContext,
    ) -> Result<(NodeKind, BTreeSet<usize>)> {
        if children.is_empty() {
            return Err(Error::invalid_condition(
                name,
                format!("{} needs at least one child", operation.name()),
            ));
        }
        if operation == LogicalOperation::Not && children.len() != 1 {
            return Err(Error::invalid_condition(
                name,
                format!("NOT takes exactly one child, got {}", children.len()),
            ));
        }

        let mut resolved = Vec::with_capacity(children.len());
        let mut used = BTreeSet::new();

        for child_name in children {
            let Some(&child) = self.condition_index.get(child_name) else {
                log::warn!("condition {name} references unknown condition {child_name}");
                return Err(Error::unknown_condition(child_name.clone()).with_frame(name));
            };

            if ctx.on_path[child] {
                log::warn!("cycle detected: {name} depends on {child_name}");
                return Err(Error::cycle(name).with_frame(child_name.clone()));
            }

            self.init_node(child, nodes, ctx)
                .map_err(|err| err.with_frame(name))?;

            used.extend(nodes[child].used_matchers.iter().copied());
            resolved.push(child);
        }

        Ok((
            NodeKind::Combination(CombinationCondition::new(operation, resolved)),
            used,
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
