//! Composable, stateful draw steps.
//!
//! A `DrawProcess` is two ordered handler lists: initializers (run once per
//! mount) and updaters (run on every redraw). Each handler belongs to one
//! step that owns its own state; chaining concatenates the lists and never
//! merges state between steps.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::color::ColorStop;
use crate::series::DataSeries;
use crate::surface::DrawContext;

/// Inputs for one draw pass.
#[derive(Clone)]
pub struct PlotProps {
    /// Selected frequency; `None` until the user picks one.
    pub cursor_freq: Option<f64>,
    pub color_map: Vec<ColorStop>,
    pub data: Arc<dyn DataSeries>,
}

impl fmt::Debug for PlotProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotProps")
            .field("cursor_freq", &self.cursor_freq)
            .field("color_map", &self.color_map)
            .field("data", &self.data.label())
            .finish()
    }
}

/// A draw step with private state. Both hooks default to no-ops.
pub trait Draw {
    fn init(&mut self, _ctx: &mut dyn DrawContext, _props: &PlotProps) {}
    fn update(&mut self, _ctx: &mut dyn DrawContext, _props: &PlotProps) {}
}

type Step = Rc<RefCell<dyn Draw>>;

#[derive(Clone, Default)]
pub struct DrawProcess {
    init: Vec<Step>,
    update: Vec<Step>,
}

impl DrawProcess {
    /// Wrap a step; it takes part in both phases.
    pub fn new<D: Draw + 'static>(step: D) -> Self {
        let step: Step = Rc::new(RefCell::new(step));
        Self { init: vec![step.clone()], update: vec![step] }
    }

    /// Build a step from closures over a private state value. A phase
    /// without a closure contributes no handler.
    pub fn from_fns<T: 'static>(
        state: T,
        init: Option<Box<dyn FnMut(&mut T, &mut dyn DrawContext, &PlotProps)>>,
        update: Option<Box<dyn FnMut(&mut T, &mut dyn DrawContext, &PlotProps)>>,
    ) -> Self {
        let has_init = init.is_some();
        let has_update = update.is_some();
        let step: Step = Rc::new(RefCell::new(FnStep { state, init, update }));
        Self {
            init: if has_init { vec![step.clone()] } else { Vec::new() },
            update: if has_update { vec![step] } else { Vec::new() },
        }
    }

    /// Run every initializer in chain order.
    pub fn initialize(&self, ctx: &mut dyn DrawContext, props: &PlotProps) -> &Self {
        for step in &self.init {
            step.borrow_mut().init(ctx, props);
        }
        self
    }

    /// Run every updater in chain order.
    pub fn update(&self, ctx: &mut dyn DrawContext, props: &PlotProps) -> &Self {
        for step in &self.update {
            step.borrow_mut().update(ctx, props);
        }
        self
    }

    /// New process running `self`'s handlers, then `other`'s. Neither input
    /// is modified.
    pub fn chain(&self, other: &DrawProcess) -> DrawProcess {
        DrawProcess {
            init: self.init.iter().chain(&other.init).cloned().collect(),
            update: self.update.iter().chain(&other.update).cloned().collect(),
        }
    }

    pub fn init_len(&self) -> usize {
        self.init.len()
    }

    pub fn update_len(&self) -> usize {
        self.update.len()
    }

    /// Same handlers, same order.
    pub fn same_sequence(&self, other: &DrawProcess) -> bool {
        fn eq(a: &[Step], b: &[Step]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
        }
        eq(&self.init, &other.init) && eq(&self.update, &other.update)
    }
}

impl fmt::Debug for DrawProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawProcess")
            .field("init", &self.init.len())
            .field("update", &self.update.len())
            .finish()
    }
}

struct FnStep<T> {
    state: T,
    init: Option<Box<dyn FnMut(&mut T, &mut dyn DrawContext, &PlotProps)>>,
    update: Option<Box<dyn FnMut(&mut T, &mut dyn DrawContext, &PlotProps)>>,
}

impl<T> Draw for FnStep<T> {
    fn init(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        if let Some(f) = self.init.as_mut() {
            f(&mut self.state, ctx, props);
        }
    }

    fn update(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        if let Some(f) = self.update.as_mut() {
            f(&mut self.state, ctx, props);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::test_support::ConstSeries;

    fn props() -> PlotProps {
        PlotProps { cursor_freq: Some(1.0), color_map: Vec::new(), data: Arc::new(ConstSeries(0.5)) }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging(name: &'static str, log: &Log) -> DrawProcess {
        let (li, lu) = (log.clone(), log.clone());
        DrawProcess::from_fns(
            0u32,
            Some(Box::new(move |_: &mut u32, _: &mut dyn DrawContext, _: &PlotProps| {
                li.borrow_mut().push(format!("init {name}"))
            })),
            Some(Box::new(move |calls: &mut u32, _: &mut dyn DrawContext, _: &PlotProps| {
                *calls += 1;
                lu.borrow_mut().push(format!("update {name} #{calls}"))
            })),
        )
    }

    #[test]
    fn test_chain_runs_inits_then_updates_in_order() {
        let log: Log = Rc::default();
        let p = logging("a", &log).chain(&logging("b", &log));
        let mut surface = RecordingSurface::new(10.0, 10.0);
        p.initialize(&mut surface, &props()).update(&mut surface, &props());
        assert_eq!(*log.borrow(), vec!["init a", "init b", "update a #1", "update b #1"]);
    }

    #[test]
    fn test_chain_is_associative() {
        let log: Log = Rc::default();
        let (a, b, c) = (logging("a", &log), logging("b", &log), logging("c", &log));
        let left = a.chain(&b).chain(&c);
        let right = a.chain(&b.chain(&c));
        assert!(left.same_sequence(&right));

        let mut surface = RecordingSurface::new(10.0, 10.0);
        left.initialize(&mut surface, &props());
        let left_log = std::mem::take(&mut *log.borrow_mut());
        right.initialize(&mut surface, &props());
        assert_eq!(left_log, *log.borrow());
    }

    #[test]
    fn test_chain_does_not_mutate_inputs() {
        let log: Log = Rc::default();
        let a = logging("a", &log);
        let b = logging("b", &log);
        let _ab = a.chain(&b);
        assert_eq!((a.init_len(), a.update_len()), (1, 1));
        assert_eq!((b.init_len(), b.update_len()), (1, 1));
    }

    #[test]
    fn test_state_is_private_per_step() {
        let log: Log = Rc::default();
        let p = logging("a", &log).chain(&logging("b", &log));
        let mut surface = RecordingSurface::new(10.0, 10.0);
        p.update(&mut surface, &props()).update(&mut surface, &props());
        assert_eq!(
            *log.borrow(),
            vec!["update a #1", "update b #1", "update a #2", "update b #2"]
        );
    }

    #[test]
    fn test_missing_phase_adds_no_handler() {
        let p = DrawProcess::from_fns(
            (),
            None,
            Some(Box::new(|_: &mut (), _: &mut dyn DrawContext, _: &PlotProps| {})),
        );
        assert_eq!((p.init_len(), p.update_len()), (0, 1));
        assert_eq!(DrawProcess::default().chain(&p).update_len(), 1);
    }
}
