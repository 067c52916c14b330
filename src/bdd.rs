use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use log::{debug, warn};

use crate::aggregate::Strategy;
use crate::cache::{Cache, OpKey};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::ordering::VariableOrdering;
use crate::reference::Ref;
use crate::store::NodeStore;
use crate::types::{Rank, Variable};

/// Configuration of a [`Bdd`] manager.
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Initial size of the computed table, in bits.
    pub cache_bits: usize,
    /// Abort construction once the store holds more nodes than this.
    pub node_limit: Option<usize>,
    /// Number of expanded `choice` tasks between two cancellation checks.
    /// Zero checks on every task.
    pub check_interval: usize,
    /// Strategy used by [`Bdd::aggregate`].
    pub strategy: Strategy,
    /// Token polled during long constructions.
    pub cancel: CancelToken,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            cache_bits: 16,
            node_limit: None,
            check_interval: 1024,
            strategy: Strategy::default(),
            cancel: CancelToken::new(),
        }
    }
}

impl BddConfig {
    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_check_interval(mut self, interval: usize) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }
}

/// A session: the node store, the variable ordering and the computed table.
///
/// All construction goes through the manager, which keeps every node reduced
/// and ordered. Refs are only meaningful for the session that created them;
/// construction operations reject foreign refs with [`Error::CrossSessionMix`],
/// and read accessors panic on them.
pub struct Bdd {
    config: BddConfig,
    store: RefCell<NodeStore>,
    ordering: RefCell<VariableOrdering>,
    cache: RefCell<Cache<OpKey, Ref>>,
    steps: Cell<usize>,
}

impl Bdd {
    pub fn new() -> Self {
        Self::with_config(BddConfig::default())
    }

    pub fn with_config(config: BddConfig) -> Self {
        let cache = Cache::new(config.cache_bits);
        Self {
            store: RefCell::new(NodeStore::new()),
            ordering: RefCell::new(VariableOrdering::new()),
            cache: RefCell::new(cache),
            steps: Cell::new(0),
            config,
        }
    }

    pub fn config(&self) -> &BddConfig {
        &self.config
    }

    pub fn set_node_limit(&mut self, limit: Option<usize>) {
        self.config.node_limit = limit;
    }

    /// Returns a handle to this manager's cancellation flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.config.cancel.clone()
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new()
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.borrow();
        f.debug_struct("Bdd")
            .field("session", &store.session())
            .field("nodes", &store.len())
            .field("variables", &self.ordering.borrow().len())
            .field("cache", &self.cache.borrow().len())
            .finish()
    }
}

// Node access
impl Bdd {
    pub fn session(&self) -> u32 {
        self.store.borrow().session()
    }

    pub fn zero(&self) -> Ref {
        self.store.borrow().constant(false)
    }
    pub fn one(&self) -> Ref {
        self.store.borrow().constant(true)
    }
    pub fn constant(&self, value: bool) -> Ref {
        self.store.borrow().constant(value)
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero()
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one()
    }
    pub fn is_constant(&self, node: Ref) -> bool {
        self.is_zero(node) || self.is_one(node)
    }

    pub(crate) fn check(&self, node: Ref) -> Result<()> {
        self.store.borrow().check(node)
    }

    fn expect_session(&self, node: Ref) {
        if let Err(e) = self.check(node) {
            panic!("{}", e);
        }
    }

    pub fn node(&self, node: Ref) -> Node {
        self.expect_session(node);
        self.store.borrow().node(node)
    }

    pub fn rank(&self, node: Ref) -> Rank {
        self.node(node).rank()
    }

    /// The if0-branch of a choice node; constants are their own branches.
    pub fn low(&self, node: Ref) -> Ref {
        self.node(node).children().map_or(node, |(low, _)| low)
    }

    /// The if1-branch of a choice node; constants are their own branches.
    pub fn high(&self, node: Ref) -> Ref {
        self.node(node).children().map_or(node, |(_, high)| high)
    }

    /// The selector variable of a choice node.
    pub fn variable_of(&self, node: Ref) -> Option<Variable> {
        match self.node(node) {
            Node::Constant(_) => None,
            Node::Choice { rank, .. } => self.ordering.borrow().get(rank),
        }
    }

    /// Returns true for elementary variable nodes (`low = FALSE`, `high = TRUE`).
    pub fn is_variable(&self, node: Ref) -> bool {
        match self.node(node) {
            Node::Constant(_) => false,
            Node::Choice { low, high, .. } => self.is_zero(low) && self.is_one(high),
        }
    }
}

// Variables and interning
impl Bdd {
    /// Returns the elementary node of the variable `name` at `rank`.
    ///
    /// Repeated calls with the same pair return the same ref.
    pub fn variable(&self, name: &str, rank: impl Into<Rank>) -> Result<Ref> {
        let rank = rank.into();
        self.ordering.borrow_mut().declare(name, rank)?;
        self.intern(rank, self.zero(), self.one())
    }

    /// Declares `name` at the next free rank and returns its elementary node.
    pub fn new_variable(&self, name: &str) -> Result<Ref> {
        let var = self.ordering.borrow_mut().declare_next(name)?;
        self.intern(var.rank(), self.zero(), self.one())
    }

    pub fn var(&self, rank: Rank) -> Option<Variable> {
        self.ordering.borrow().get(rank)
    }

    pub fn var_by_name(&self, name: &str) -> Option<Variable> {
        let ordering = self.ordering.borrow();
        ordering.rank(name).and_then(|rank| ordering.get(rank))
    }

    /// All declared variables, in rank order.
    pub fn variables(&self) -> Vec<Variable> {
        self.ordering.borrow().iter().collect()
    }

    pub fn num_vars(&self) -> usize {
        self.ordering.borrow().len()
    }

    /// The single entry point for interior node creation.
    ///
    /// `low == high` returns the shared child. Otherwise `rank` must be declared
    /// and strictly above both children's ranks.
    pub fn intern(&self, rank: Rank, low: Ref, high: Ref) -> Result<Ref> {
        debug!("intern(rank = {}, low = {}, high = {})", rank, low, high);
        self.check(low)?;
        self.check(high)?;
        if low != high && !self.ordering.borrow().contains(rank) {
            return Err(Error::UndeclaredRank { rank });
        }
        self.mk_node(rank, low, high)
    }

    fn mk_node(&self, rank: Rank, low: Ref, high: Ref) -> Result<Ref> {
        let res = self.store.borrow_mut().intern(rank, low, high)?;
        if let Some(limit) = self.config.node_limit {
            if self.store.borrow().len() > limit {
                warn!("node limit {} exceeded", limit);
                return Err(Error::NodeLimitExceeded { limit });
            }
        }
        Ok(res)
    }

    /// Polls the cancellation flag and the node limit.
    pub(crate) fn checkpoint(&self) -> Result<()> {
        if self.config.cancel.is_cancelled() {
            warn!("construction cancelled with {} nodes stored", self.num_nodes());
            return Err(Error::Cancelled);
        }
        if let Some(limit) = self.config.node_limit {
            if self.num_nodes() > limit {
                return Err(Error::NodeLimitExceeded { limit });
            }
        }
        Ok(())
    }

    fn tick(&self) -> Result<()> {
        let steps = self.steps.get() + 1;
        self.steps.set(steps);
        if steps % self.config.check_interval.max(1) == 0 {
            self.checkpoint()?;
        }
        Ok(())
    }

    /// Ends the session: drops all nodes, variables and cached results.
    ///
    /// Refs obtained before the call are rejected afterwards.
    pub fn clear(&self) {
        debug!("clear()");
        self.store.borrow_mut().clear();
        self.ordering.borrow_mut().clear();
        self.cache.borrow_mut().clear();
        self.steps.set(0);
    }
}

// Restriction and the combinator
impl Bdd {
    /// Branches of `node` with respect to `rank`, which must not be below `node`'s top.
    fn top_cofactors(&self, node: Ref, rank: Rank) -> (Ref, Ref) {
        match self.store.borrow().node(node) {
            Node::Choice { rank: r, low, high } if r == rank => (low, high),
            n => {
                debug_assert!(rank < n.rank());
                (node, node)
            }
        }
    }

    /// Restricts `node` to `value` for the variable at `rank`.
    ///
    /// Nodes whose top rank lies below `rank` cannot depend on it and are
    /// returned unchanged; constants are fixed points.
    pub fn substitute(&self, node: Ref, rank: Rank, value: bool) -> Result<Ref> {
        debug!("substitute(node = {}, rank = {}, value = {})", node, rank, value);
        self.check(node)?;

        enum Task {
            Expand(Ref),
            Build(Ref, Rank),
        }

        let mut memo: HashMap<Ref, Ref> = HashMap::new();
        let mut tasks = vec![Task::Expand(node)];
        let mut results: Vec<Ref> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Expand(node) => {
                    let (top, low, high) = match self.store.borrow().node(node) {
                        Node::Choice { rank: top, low, high } if top < rank => (top, low, high),
                        Node::Choice { rank: top, low, high } if top == rank => {
                            results.push(if value { high } else { low });
                            continue;
                        }
                        _ => {
                            results.push(node);
                            continue;
                        }
                    };

                    if let Some(&res) = memo.get(&node) {
                        results.push(res);
                        continue;
                    }
                    if let Some(res) = self.cache.borrow_mut().get(&OpKey::Substitute(node, rank, value)) {
                        memo.insert(node, res);
                        results.push(res);
                        continue;
                    }

                    tasks.push(Task::Build(node, top));
                    tasks.push(Task::Expand(high));
                    tasks.push(Task::Expand(low));
                }
                Task::Build(node, top) => {
                    let high = results.pop().expect("high result present in result stack");
                    let low = results.pop().expect("low result present in result stack");
                    let res = self.mk_node(top, low, high)?;
                    memo.insert(node, res);
                    self.cache.borrow_mut().insert(OpKey::Substitute(node, rank, value), res);
                    results.push(res);
                }
            }
        }

        debug_assert_eq!(results.len(), 1);
        Ok(results.pop().expect("substitute produces a result"))
    }

    fn choice_terminal(&self, index: Ref, if0: Ref, if1: Ref) -> Option<Ref> {
        if if0 == if1 {
            debug!("choice(F,G,G) => G");
            return Some(if0);
        }
        if self.is_zero(if0) && self.is_one(if1) {
            debug!("choice(F,0,1) => F");
            return Some(index);
        }
        if self.is_zero(index) {
            debug!("choice(0,G,H) => G");
            return Some(if0);
        }
        if self.is_one(index) {
            debug!("choice(1,G,H) => H");
            return Some(if1);
        }
        None
    }

    /// Generalized if-then-else: for every assignment, follow `if0` where
    /// `index` is 0 and `if1` where it is 1.
    ///
    /// ```
    /// use choice_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let a = bdd.variable("a", 0u32).unwrap();
    /// let b = bdd.variable("b", 1u32).unwrap();
    ///
    /// // Selecting between FALSE and TRUE is the identity.
    /// assert_eq!(bdd.choice(a, bdd.zero(), bdd.one()).unwrap(), a);
    ///
    /// // a AND b
    /// let f = bdd.choice(a, bdd.zero(), b).unwrap();
    /// assert_eq!(bdd.to_canonical_string(f), "a(0,b(0,1))");
    /// ```
    pub fn choice(&self, index: Ref, if0: Ref, if1: Ref) -> Result<Ref> {
        debug!("choice(index = {}, if0 = {}, if1 = {})", index, if0, if1);
        self.check(index)?;
        self.check(if0)?;
        self.check(if1)?;

        enum Task {
            Expand(Ref, Ref, Ref),
            Build(OpKey, Rank),
        }

        let mut tasks = vec![Task::Expand(index, if0, if1)];
        let mut results: Vec<Ref> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Expand(f, g, h) => {
                    if let Some(res) = self.choice_terminal(f, g, h) {
                        results.push(res);
                        continue;
                    }

                    let key = OpKey::Choice(f, g, h);
                    if let Some(res) = self.cache.borrow_mut().get(&key) {
                        debug!("cache: choice({}, {}, {}) -> {}", f, g, h, res);
                        results.push(res);
                        continue;
                    }

                    self.tick()?;

                    let rank = {
                        let store = self.store.borrow();
                        store.rank(f).min(store.rank(g)).min(store.rank(h))
                    };
                    debug_assert!(!rank.is_terminal());

                    let (f0, f1) = self.top_cofactors(f, rank);
                    let (g0, g1) = self.top_cofactors(g, rank);
                    let (h0, h1) = self.top_cofactors(h, rank);

                    tasks.push(Task::Build(key, rank));
                    tasks.push(Task::Expand(f1, g1, h1));
                    tasks.push(Task::Expand(f0, g0, h0));
                }
                Task::Build(key, rank) => {
                    let high = results.pop().expect("high result present in result stack");
                    let low = results.pop().expect("low result present in result stack");
                    let res = self.mk_node(rank, low, high)?;
                    debug!("computed: {:?} -> {}", key, res);
                    self.cache.borrow_mut().insert(key, res);
                    results.push(res);
                }
            }
        }

        debug_assert_eq!(results.len(), 1);
        Ok(results.pop().expect("choice produces a result"))
    }
}

// Derived connectives
impl Bdd {
    pub fn negate(&self, f: Ref) -> Result<Ref> {
        self.choice(f, self.one(), self.zero())
    }

    pub fn and(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.choice(f, self.zero(), g)
    }

    pub fn or(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.choice(f, g, self.one())
    }

    pub fn xor(&self, f: Ref, g: Ref) -> Result<Ref> {
        let not_g = self.negate(g)?;
        self.choice(f, g, not_g)
    }

    pub fn equiv(&self, f: Ref, g: Ref) -> Result<Ref> {
        let not_g = self.negate(g)?;
        self.choice(f, not_g, g)
    }

    pub fn implies(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.choice(f, self.one(), g)
    }

    pub fn and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Result<Ref> {
        let mut res = self.one();
        for node in nodes {
            res = self.and(res, node)?;
        }
        Ok(res)
    }

    pub fn or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Result<Ref> {
        let mut res = self.zero();
        for node in nodes {
            res = self.or(res, node)?;
        }
        Ok(res)
    }
}

// Inspection
impl Bdd {
    /// All nodes reachable from `roots`, constants included.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        for root in roots {
            self.expect_session(root);
            queue.push_back(root);
        }

        let store = self.store.borrow();
        while let Some(node) = queue.pop_front() {
            if visited.insert(node) {
                if let Some((low, high)) = store.node(node).children() {
                    queue.push_back(low);
                    queue.push_back(high);
                }
            }
        }

        visited
    }

    /// Number of distinct nodes reachable from `f`, constants included.
    pub fn size(&self, f: Ref) -> usize {
        self.descendants([f]).len()
    }

    /// Ranks of the variables `f` depends on, ascending.
    pub fn support(&self, f: Ref) -> Vec<Rank> {
        let store = self.store.borrow();
        self.descendants([f])
            .into_iter()
            .map(|node| store.rank(node))
            .filter(|rank| !rank.is_terminal())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of nodes stored in the session, constants included.
    pub fn num_nodes(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn nodes_per_rank(&self) -> BTreeMap<Rank, usize> {
        self.store.borrow().nodes_per_rank()
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.borrow().hits()
    }

    pub fn cache_misses(&self) -> usize {
        self.cache.borrow().misses()
    }
}
