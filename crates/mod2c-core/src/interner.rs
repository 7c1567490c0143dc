//! String interning with reference counts.
//!
//! Converts character sequences into cheap integer handles (`Symbol`).
//! Two symbols obtained from the same interner are equal exactly when
//! their character sequences are byte-identical, so comparing lexemes
//! reduces to O(1) integer comparison.
//!
//! Entries are reference counted: every `intern` of a sequence counts as
//! one retain, and `release` reclaims the slot when the count reaches
//! zero. Reclaimed slots are reused for later interns.

use std::collections::HashMap;

/// A lightweight handle to an interned string.
///
/// Symbols are only meaningful together with the interner that produced
/// them; resolving a symbol through a different interner is a logic error
/// and reported as `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    /// Raw index for debugging output.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

struct Slot {
    text: String,
    refs: u32,
}

/// String interner. Deduplicates strings and returns `Symbol` handles.
#[derive(Default)]
pub struct Interner {
    /// Map from live string to its symbol.
    map: HashMap<String, Symbol>,
    /// Slot storage indexed by symbol; `None` marks a reclaimed slot.
    slots: Vec<Option<Slot>>,
    /// Reclaimed slot indices available for reuse.
    free: Vec<u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its handle.
    ///
    /// The first intern of a sequence creates an entry with a reference
    /// count of one; every further intern of the same sequence increments
    /// the count and returns the same handle.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            let slot = self.slots[sym.0 as usize]
                .as_mut()
                .expect("mapped symbol must have a live slot");
            slot.refs += 1;
            return sym;
        }

        let slot = Slot {
            text: s.to_owned(),
            refs: 1,
        };
        let sym = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(slot);
                Symbol(index)
            }
            None => {
                self.slots.push(Some(slot));
                Symbol((self.slots.len() - 1) as u32)
            }
        };
        self.map.insert(s.to_owned(), sym);
        sym
    }

    /// Resolve a handle back to its string. `None` for stale handles.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.slots
            .get(sym.0 as usize)?
            .as_ref()
            .map(|slot| slot.text.as_str())
    }

    /// Length in bytes of the interned sequence.
    #[inline]
    pub fn length(&self, sym: Symbol) -> Option<usize> {
        self.resolve(sym).map(str::len)
    }

    /// Look up an existing entry without creating one or touching counts.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    /// Current reference count of an entry. `None` for stale handles.
    pub fn ref_count(&self, sym: Symbol) -> Option<u32> {
        self.slots
            .get(sym.0 as usize)?
            .as_ref()
            .map(|slot| slot.refs)
    }

    /// Increment the reference count. Returns `false` for stale handles.
    pub fn retain(&mut self, sym: Symbol) -> bool {
        match self.slots.get_mut(sym.0 as usize) {
            Some(Some(slot)) => {
                slot.refs += 1;
                true
            }
            _ => false,
        }
    }

    /// Decrement the reference count, reclaiming the slot at zero.
    ///
    /// Returns `false` for stale handles. After reclamation the handle is
    /// stale and the slot index may be reused by a later `intern`.
    pub fn release(&mut self, sym: Symbol) -> bool {
        let Some(Some(slot)) = self.slots.get_mut(sym.0 as usize) else {
            return false;
        };
        slot.refs -= 1;
        if slot.refs == 0 {
            let text = std::mem::take(&mut slot.text);
            self.map.remove(&text);
            self.slots[sym.0 as usize] = None;
            self.free.push(sym.0);
        }
        true
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over live entries with their symbols.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|slot| (Symbol(i as u32), slot.text.as_str()))
        })
    }
}
