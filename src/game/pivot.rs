use super::types::Vec2;

// A pivot marks where and with what heading the chain's head changed
// direction. Values are immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub position: Vec2,
    pub direction: f64,
}

pub fn pivot_matches(a: &Pivot, b: &Pivot) -> bool {
    a.position.x == b.position.x && a.position.y == b.position.y && a.direction == b.direction
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotHandle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct PivotNode {
    value: Pivot,
    next: Option<PivotHandle>,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    node: Option<PivotNode>,
}

// The pending-waypoint log shared by every segment of one chain. Nodes
// live in an arena and segments hold generation-checked handles, so a
// handle into removed memory cannot be dereferenced silently. Nodes are
// only ever unlinked from the head side, by the tail segment, once every
// segment ahead of it has advanced past the node.
#[derive(Debug, Default)]
pub struct PivotLog {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<PivotHandle>,
}

impl PivotLog {
    pub fn new() -> Self {
        PivotLog {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
        }
    }

    // O(n) walk to the tail. Appends happen once per steer command, not
    // once per tick, so the walk stays cheap at realistic chain lengths.
    pub fn append(&mut self, value: Pivot) -> PivotHandle {
        let handle = self.allocate(value);
        match self.head {
            None => self.head = Some(handle),
            Some(head) => {
                let mut current = head;
                while let Some(next) = self.node(current).next {
                    current = next;
                }
                self.node_mut(current).next = Some(handle);
            }
        }
        handle
    }

    // Removes the first node whose value matches. Head nodes splice
    // directly; anything else is a single prev/current pass.
    pub fn delete(&mut self, value: &Pivot) -> bool {
        let Some(head) = self.head else {
            return false;
        };

        if pivot_matches(&self.node(head).value, value) {
            self.head = self.node(head).next;
            self.release(head);
            return true;
        }

        let mut previous = head;
        let mut current = self.node(head).next;
        while let Some(handle) = current {
            if pivot_matches(&self.node(handle).value, value) {
                let successor = self.node(handle).next;
                self.node_mut(previous).next = successor;
                self.release(handle);
                return true;
            }
            previous = handle;
            current = self.node(handle).next;
        }
        false
    }

    // Tail-side consumption of the oldest pending pivot. Empty is not an
    // error, just nothing left to pop.
    pub fn pop_front(&mut self) -> Option<Pivot> {
        let head = self.head?;
        let value = self.node(head).value;
        self.delete(&value);
        Some(value)
    }

    pub fn head(&self) -> Option<PivotHandle> {
        self.head
    }

    pub fn get(&self, handle: PivotHandle) -> Pivot {
        self.node(handle).value
    }

    pub fn next(&self, handle: PivotHandle) -> Option<PivotHandle> {
        self.node(handle).next
    }

    pub fn size(&self) -> usize {
        self.traverse().len()
    }

    pub fn traverse(&self) -> Vec<Pivot> {
        let mut values = Vec::new();
        let mut current = self.head;
        while let Some(handle) = current {
            let node = self.node(handle);
            values.push(node.value);
            current = node.next;
        }
        values
    }

    fn allocate(&mut self, value: Pivot) -> PivotHandle {
        let node = PivotNode { value, next: None };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                PivotHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                PivotHandle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn release(&mut self, handle: PivotHandle) {
        let slot = &mut self.slots[handle.index];
        slot.node = None;
        slot.generation += 1;
        self.free.push(handle.index);
    }

    // A live handle always resolves. Anything else means a segment kept a
    // pointer past the tail's pop; continuing would corrupt position
    // state, so fail loudly.
    fn node(&self, handle: PivotHandle) -> &PivotNode {
        match self.slots.get(handle.index) {
            Some(slot) if slot.generation == handle.generation => slot
                .node
                .as_ref()
                .expect("pivot slot emptied without a generation bump"),
            _ => panic!("stale pivot handle dereferenced"),
        }
    }

    fn node_mut(&mut self, handle: PivotHandle) -> &mut PivotNode {
        match self.slots.get_mut(handle.index) {
            Some(slot) if slot.generation == handle.generation => slot
                .node
                .as_mut()
                .expect("pivot slot emptied without a generation bump"),
            _ => panic!("stale pivot handle dereferenced"),
        }
    }
}
