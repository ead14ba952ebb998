//! # Internal Macros
//!
//! ## zerocopy_accessors!
//!
//! Row slots that hold an indirect reference are `#[repr(C)]` zerocopy
//! structs whose fields are little-endian `U32` wrappers, so a slot can be
//! viewed in place inside an unaligned row buffer. This macro gives each
//! field a native-`u32` getter and a `set_` writer, which is how `RowView`
//! repoints a String or Binary column:
//!
//! ```ignore
//! let slot = VarSlot::mut_from_bytes(&mut data[offset..offset + VAR_SLOT_SIZE])?;
//! slot.set_ordinal(ordinal as u32);
//! slot.set_len(value.len() as u32);
//! ```
//!
//! Only `u32` fields are supported; the slot layout has no other widths.

/// Native `u32` getter and `set_` writer per little-endian `U32` field.
macro_rules! zerocopy_accessors {
    ($($field:ident: u32),* $(,)?) => {
        ::paste::paste! {
            $(
                #[inline]
                pub fn $field(&self) -> u32 {
                    self.$field.get()
                }

                #[inline]
                pub fn [<set_ $field>](&mut self, val: u32) {
                    self.$field = ::zerocopy::little_endian::U32::new(val);
                }
            )*
        }
    };
}
