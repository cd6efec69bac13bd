//! Dynamically resolved OS entry points.
//!
//! Toasts need a handful of exports from SHELL32, PROPSYS and COMBASE that are
//! missing on older systems. They are resolved at runtime so an incompatible
//! system reports which ones are absent instead of failing to load the binary.

use crate::error::{Result, ToastError};
use libloading::Library;

type SetAppIdFn = unsafe extern "system" fn(app_id: *const u16) -> i32;

const SET_APP_ID: &str = "SetCurrentProcessExplicitAppUserModelID";

/// Libraries and their required exports, in resolution order
const REQUIRED: &[(&str, &[&str])] = &[
    ("SHELL32.DLL", &[SET_APP_ID]),
    ("PROPSYS.DLL", &["PropVariantToString"]),
    (
        "COMBASE.DLL",
        &[
            "RoGetActivationFactory",
            "WindowsCreateStringReference",
            "WindowsDeleteString",
        ],
    ),
];

pub struct EntryPoints {
    set_app_id: Option<SetAppIdFn>,
    missing: Vec<String>,
    // Keeps resolved function pointers valid
    _libraries: Vec<Library>,
}

impl EntryPoints {
    /// Resolve every required export
    pub fn load() -> Self {
        Self::resolve(REQUIRED)
    }

    /// Resolution stops at the first library or symbol that cannot be found;
    /// it and everything after it count as missing.
    fn resolve(required: &[(&str, &[&str])]) -> Self {
        let mut libraries = Vec::new();
        let mut set_app_id = None;
        let mut missing = Vec::new();
        let mut failed = false;

        for (library_name, symbols) in required {
            if failed {
                missing.extend(symbols.iter().map(|s| s.to_string()));
                continue;
            }

            // SAFETY: system libraries with no initialisation side effects
            let library = match unsafe { Library::new(*library_name) } {
                Ok(library) => library,
                Err(e) => {
                    tracing::debug!("Failed to load {}: {}", library_name, e);
                    missing.extend(symbols.iter().map(|s| s.to_string()));
                    failed = true;
                    continue;
                }
            };

            for symbol in symbols.iter() {
                if failed {
                    missing.push(symbol.to_string());
                    continue;
                }
                if *symbol == SET_APP_ID {
                    // SAFETY: signature matches the documented export
                    match unsafe { library.get::<SetAppIdFn>(symbol.as_bytes()) } {
                        Ok(f) => set_app_id = Some(*f),
                        Err(e) => {
                            tracing::debug!("{} not found in {}: {}", symbol, library_name, e);
                            missing.push(symbol.to_string());
                            failed = true;
                        }
                    }
                } else {
                    // SAFETY: only probed for presence, never called
                    let found = unsafe { library.get::<*const ()>(symbol.as_bytes()) }.is_ok();
                    if !found {
                        tracing::debug!("{} not found in {}", symbol, library_name);
                        missing.push(symbol.to_string());
                        failed = true;
                    }
                }
            }

            libraries.push(library);
        }

        if missing.is_empty() {
            tracing::debug!("All toast entry points resolved");
        } else {
            tracing::warn!("Missing toast entry points: {:?}", missing);
        }

        Self {
            set_app_id,
            missing,
            _libraries: libraries,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Call `SetCurrentProcessExplicitAppUserModelID`
    pub fn set_current_process_app_id(&self, aumi: &str) -> Result<()> {
        let set_app_id = self
            .set_app_id
            .ok_or_else(|| ToastError::Incompatible(vec![SET_APP_ID.to_string()]))?;

        if aumi.contains('\0') {
            return Err(ToastError::InvalidArgument(
                "AUMI contains an interior NUL".to_string(),
            ));
        }
        let wide: Vec<u16> = aumi.encode_utf16().chain(std::iter::once(0)).collect();

        // SAFETY: `wide` is NUL-terminated and outlives the call
        let hr = unsafe { set_app_id(wide.as_ptr()) };
        if hr < 0 {
            return Err(ToastError::Platform(format!(
                "{} failed: 0x{:08X}",
                SET_APP_ID, hr as u32
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for EntryPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPoints")
            .field("set_app_id", &self.set_app_id.is_some())
            .field("missing", &self.missing)
            .finish()
    }
}
