//! Pattern-to-action registry.
use crate::action::Action;
use joran_types::Pattern;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct Rule {
    key: Pattern,
    /// Set for `*/...` keys.
    suffix: Option<Pattern>,
    actions: Vec<Arc<dyn Action>>,
}

/// Maps patterns to ordered action lists.
///
/// Rules are registered during setup; afterwards the store is only read, so
/// one store can back several interpreters at once.
///
/// Lookup order:
/// 1. a rule whose key equals the path exactly;
/// 2. otherwise the `*/suffix` rule with the longest tail match against the
///    path. On equal tail matches the shorter suffix wins (it matched in
///    full), and after that the rule registered first.
#[derive(Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    index: HashMap<Pattern, usize>,
}

impl fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for rule in &self.rules {
            let names: Vec<&str> = rule.actions.iter().map(|a| a.name()).collect();
            map.entry(&rule.key.to_string(), &names);
        }
        map.finish()
    }
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` to the list bound to `pattern`. Actions sharing a key
    /// fire in registration order.
    pub fn add_rule(&mut self, pattern: impl Into<Pattern>, action: Arc<dyn Action>) {
        let pattern = pattern.into();
        if let Some(&i) = self.index.get(&pattern) {
            self.rules[i].actions.push(action);
            return;
        }
        log::debug!("Adding rule for pattern [{}]", pattern);
        self.index.insert(pattern.clone(), self.rules.len());
        self.rules.push(Rule {
            suffix: pattern.tail_suffix(),
            key: pattern,
            actions: vec![action],
        });
    }

    /// Returns the actions applicable to `pattern`, or `None` if no rule
    /// matches.
    pub fn match_actions(&self, pattern: &Pattern) -> Option<&[Arc<dyn Action>]> {
        if let Some(&i) = self.index.get(pattern) {
            return Some(&self.rules[i].actions);
        }

        // (tail match, suffix length, rule)
        let mut best: Option<(usize, usize, &Rule)> = None;
        for rule in &self.rules {
            let Some(suffix) = &rule.suffix else {
                continue;
            };
            let score = pattern.tail_match(suffix);
            if score == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_score, best_len, _)) => {
                    score > best_score || (score == best_score && suffix.len() < best_len)
                }
            };
            if better {
                best = Some((score, suffix.len(), rule));
            }
        }
        best.map(|(_, _, rule)| rule.actions.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.rules.iter().map(|r| &r.key)
    }

    /// Every registered action once, in registration order, even when it is
    /// bound to several patterns.
    pub fn distinct_actions(&self) -> Vec<Arc<dyn Action>> {
        let mut seen: Vec<*const ()> = Vec::new();
        let mut out = Vec::new();
        for action in self.rules.iter().flat_map(|r| r.actions.iter()) {
            let ptr = Arc::as_ptr(action) as *const ();
            if !seen.contains(&ptr) {
                seen.push(ptr);
                out.push(Arc::clone(action));
            }
        }
        out
    }
}
