//! The `state_object!` declaration macro.
//!
//! One declaration per field is all a facet needs: the macro expands it into
//! the struct field, its `Default` initializer, its entry in the declared
//! schema (`State::fields`/`fields_mut`), and (unless the field is declared
//! without a setter arrow) a fluent setter on the companion builder. Adding
//! a field to a state therefore produces its serialization and its setter
//! automatically, with no hand-written boilerplate to drift out of sync.
//!
//! Fields *without* a setter arrow form the exclusion list: values computed
//! from context (e.g. a detector name looked up from instrument geometry at
//! construction time) that callers must not supply directly.
//!
//! A setter name colliding with an existing builder method is a duplicate
//! definition in one `impl` block, a compile error at definition time, so a
//! silent override can never hide a programmer error.

/// Declare a state object, its schema and its companion builder in one place.
///
/// # Syntax
///
/// ```rust,ignore
/// state_object! {
///     /// Wavelength conversion limits.
///     pub struct WavelengthState("wavelength") builder WavelengthBuilder {
///         param wavelength_low: f64 = Param::new("wavelength_low").with_lower_bound(0.0)
///             => set_wavelength_low;
///         param detector_name: String = Param::new("detector_name"); // excluded: no setter
///         group adjustment: AdjustmentState = Group::new("adjustment") => set_adjustment;
///     }
///     checks |state, report| {
///         // local cross-field checks appending to `report`
///     }
/// }
/// ```
///
/// `param` fields get `set_x(self, value) -> StateResult<Self>` setters that
/// check the declared constraint immediately; `group` fields get
/// `set_x(self, Frozen<Sub>) -> Self` setters that only accept already
/// frozen sub-states. `build()` clones the working state, validates it, and
/// returns a [`Frozen`](crate::state::Frozen) snapshot.
#[macro_export]
macro_rules! state_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($wire:literal) builder $builder:ident {
            $(
                $(#[$fmeta:meta])*
                $kind:ident $field:ident : $fty:ty = $init:expr $(=> $setter:ident)? ;
            )+
        }
        $(checks |$slf:ident, $report:ident| $checks:block)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $vis $field: $crate::state_object!(@slot $kind $fty),
            )+
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $init, )+
                }
            }
        }

        impl $crate::state::State for $name {
            fn state_name(&self) -> &'static str {
                $wire
            }

            fn fields(&self) -> ::std::vec::Vec<&dyn $crate::param::Field> {
                vec![ $( &self.$field as &dyn $crate::param::Field, )+ ]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<&mut dyn $crate::param::Field> {
                vec![ $( &mut self.$field as &mut dyn $crate::param::Field, )+ ]
            }

            $(
                fn check(&self, report: &mut $crate::validate::ValidationReport) {
                    let $slf = self;
                    let $report = report;
                    $checks
                }
            )?
        }

        #[doc = concat!("Fluent builder for [`", stringify!($name), "`].")]
        #[derive(Clone, Debug, Default)]
        $vis struct $builder {
            state: $name,
        }

        impl $builder {
            #[doc = concat!("Create a builder over a default `", stringify!($name), "`.")]
            $vis fn new() -> Self {
                Self {
                    state: <$name as ::std::default::Default>::default(),
                }
            }

            /// Wrap an in-progress state (used by context-aware constructors).
            $vis fn from_state(state: $name) -> Self {
                Self { state }
            }

            /// Read-only view of the in-progress state.
            $vis fn state(&self) -> &$name {
                &self.state
            }

            /// Validate the working state and freeze a snapshot of it.
            ///
            /// The snapshot is a copy: the builder and the returned state
            /// diverge from this point on.
            $vis fn build(
                &self,
            ) -> $crate::error::StateResult<$crate::state::Frozen<$name>> {
                $crate::state::Frozen::freeze(self.state.clone())
            }

            $(
                $crate::state_object!(@setter $kind $field : $fty $(=> $setter)?);
            )+
        }
    };

    // ---- slot types ---------------------------------------------------------

    (@slot param $fty:ty) => { $crate::param::Param<$fty> };
    (@slot group $fty:ty) => { $crate::param::Group<$fty> };

    // ---- setter generation --------------------------------------------------

    (@setter param $field:ident : $fty:ty => $setter:ident) => {
        #[doc = concat!(
            "Set `", stringify!($field), "`, checking its constraint immediately."
        )]
        pub fn $setter(mut self, value: $fty) -> $crate::error::StateResult<Self> {
            self.state.$field.set(value)?;
            Ok(self)
        }
    };

    (@setter group $field:ident : $fty:ty => $setter:ident) => {
        #[doc = concat!("Attach a frozen `", stringify!($field), "` sub-state.")]
        pub fn $setter(mut self, value: $crate::state::Frozen<$fty>) -> Self {
            self.state.$field.replace(value.into_inner());
            self
        }
    };

    // Excluded fields (no setter arrow) generate nothing.
    (@setter param $field:ident : $fty:ty) => {};
    (@setter group $field:ident : $fty:ty) => {};
}
