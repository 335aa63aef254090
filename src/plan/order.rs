//! Execution ordering.
//! Sources are unique, so "my destination is your source" gives every step at
//! most one blocker; the dependency graph is a functional graph made of
//! chains and disjoint simple cycles. Chains are peeled from their free end;
//! each cycle is broken with exactly one temporary hop.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::fs_ops::temp_sibling;

use super::{ExecutionOrder, RenameOp, RenamePlan};

pub fn order_plan(plan: &RenamePlan) -> ExecutionOrder {
    let steps = &plan.steps;
    let source_index: HashMap<&Path, usize> = steps
        .iter()
        .enumerate()
        .map(|(i, s)| (s.source.as_path(), i))
        .collect();

    // blocker[i]: the step whose source currently occupies step i's destination.
    let blocker: Vec<Option<usize>> = steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            source_index
                .get(s.dest.as_path())
                .copied()
                .filter(|&j| j != i)
        })
        .collect();

    let mut dependents: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, b) in blocker.iter().enumerate() {
        if let Some(j) = *b {
            dependents.entry(j).or_default().push(i);
        }
    }

    let mut order = ExecutionOrder::default();
    let mut executed = vec![false; steps.len()];

    // Peel chains: a step runs once nothing still needs its destination
    // to keep its old identity.
    let mut ready: VecDeque<usize> = (0..steps.len()).filter(|&i| blocker[i].is_none()).collect();
    while let Some(i) = ready.pop_front() {
        executed[i] = true;
        order.ops.push(RenameOp {
            from: steps[i].source.clone(),
            to: steps[i].dest.clone(),
            via_temp: false,
        });
        if let Some(deps) = dependents.get(&i) {
            for &d in deps {
                ready.push_back(d);
            }
        }
    }

    // Whatever is left sits on disjoint simple cycles.
    let mut avoid: HashSet<PathBuf> = steps
        .iter()
        .flat_map(|s| [s.source.clone(), s.dest.clone()])
        .collect();
    let dest_index: HashMap<&Path, usize> = steps
        .iter()
        .enumerate()
        .map(|(i, s)| (s.dest.as_path(), i))
        .collect();

    for start in 0..steps.len() {
        if executed[start] {
            continue;
        }
        // Park `start`'s source out of the way, unwinding the rest of the
        // cycle as an ordinary chain, then land the parked file.
        let temp = temp_sibling(&steps[start].dest, &avoid);
        avoid.insert(temp.clone());
        debug!(
            source = %steps[start].source.display(),
            temp = %temp.display(),
            "breaking rename cycle via temporary name"
        );
        order.ops.push(RenameOp {
            from: steps[start].source.clone(),
            to: temp.clone(),
            via_temp: true,
        });
        executed[start] = true;

        let mut cur = dest_index[steps[start].source.as_path()];
        while cur != start {
            executed[cur] = true;
            order.ops.push(RenameOp {
                from: steps[cur].source.clone(),
                to: steps[cur].dest.clone(),
                via_temp: false,
            });
            cur = dest_index[steps[cur].source.as_path()];
        }

        order.ops.push(RenameOp {
            from: temp,
            to: steps[start].dest.clone(),
            via_temp: true,
        });
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::RenameStep;
    use std::path::PathBuf;

    fn plan_of(pairs: &[(&str, &str)]) -> RenamePlan {
        RenamePlan {
            steps: pairs
                .iter()
                .enumerate()
                .map(|(index, (s, d))| RenameStep {
                    source: PathBuf::from(s),
                    dest: PathBuf::from(d),
                    index,
                })
                .collect(),
            unchanged: Vec::new(),
        }
    }

    fn as_pairs(order: &ExecutionOrder) -> Vec<(String, String)> {
        order
            .ops
            .iter()
            .map(|op| {
                (
                    op.from.to_string_lossy().into_owned(),
                    op.to.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn independent_renames_keep_plan_order() {
        let order = order_plan(&plan_of(&[("/t/a", "/t/x"), ("/t/b", "/t/y")]));
        assert_eq!(
            as_pairs(&order),
            vec![
                ("/t/a".into(), "/t/x".into()),
                ("/t/b".into(), "/t/y".into())
            ]
        );
    }

    #[test]
    fn chain_is_vacated_from_the_free_end() {
        // a->b, b->c, c->d must execute as c->d, b->c, a->b
        let order = order_plan(&plan_of(&[("/t/a", "/t/b"), ("/t/b", "/t/c"), ("/t/c", "/t/d")]));
        assert_eq!(
            as_pairs(&order),
            vec![
                ("/t/c".into(), "/t/d".into()),
                ("/t/b".into(), "/t/c".into()),
                ("/t/a".into(), "/t/b".into())
            ]
        );
    }

    #[test]
    fn swap_uses_one_temporary_hop() {
        let order = order_plan(&plan_of(&[("/t/a", "/t/b"), ("/t/b", "/t/a")]));
        assert_eq!(order.len(), 3);
        assert!(order.ops[0].via_temp);
        assert!(order.ops[2].via_temp);
        // first hop parks a, middle op is the straight b->a rename,
        // last hop lands the parked file at b
        assert_eq!(order.ops[0].from, PathBuf::from("/t/a"));
        assert_eq!(order.ops[1].from, PathBuf::from("/t/b"));
        assert_eq!(order.ops[1].to, PathBuf::from("/t/a"));
        assert_eq!(order.ops[0].to, order.ops[2].from);
        assert_eq!(order.ops[2].to, PathBuf::from("/t/b"));
    }

    #[test]
    fn three_cycle_uses_one_temporary_hop() {
        // a->b->c->a
        let order = order_plan(&plan_of(&[("/t/a", "/t/b"), ("/t/b", "/t/c"), ("/t/c", "/t/a")]));
        assert_eq!(order.len(), 4);
        assert_eq!(order.ops.iter().filter(|op| op.via_temp).count(), 2);
        // simulate: every op's target must be unoccupied at execution time
        let mut occupied: std::collections::HashSet<PathBuf> =
            ["/t/a", "/t/b", "/t/c"].iter().map(PathBuf::from).collect();
        for op in &order.ops {
            assert!(occupied.remove(&op.from), "source {} vanished", op.from.display());
            assert!(occupied.insert(op.to.clone()), "target {} occupied", op.to.display());
        }
        assert_eq!(
            occupied,
            ["/t/a", "/t/b", "/t/c"].iter().map(PathBuf::from).collect()
        );
    }

    #[test]
    fn chain_feeding_into_cycle_waits_for_it() {
        // swap a<->b plus c -> a's old spot is impossible (collision), so use:
        // cycle a->b, b->a and independent chain c->d
        let order = order_plan(&plan_of(&[("/t/a", "/t/b"), ("/t/b", "/t/a"), ("/t/c", "/t/d")]));
        // chain op is unblocked and comes out of the peel first
        assert_eq!(order.ops[0].from, PathBuf::from("/t/c"));
        assert_eq!(order.len(), 4);
    }
}
