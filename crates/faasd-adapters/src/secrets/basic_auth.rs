//! Basic-auth credentials for the gateway.

use std::io::{self, Read, Write};
use std::path::Path;

use faasd_core::application::ports::{EntryKind, Filesystem, SecretGenerator};
use rand::{Rng, distr::Alphanumeric};
use tracing::{debug, info, instrument};

/// File holding the gateway admin user name.
pub const USER_FILE: &str = "basic-auth-user";

/// File holding the gateway admin password.
pub const PASSWORD_FILE: &str = "basic-auth-password";

/// Default admin user name.
pub const DEFAULT_USER: &str = "admin";

/// Length of generated passwords.
pub const PASSWORD_LEN: usize = 63;

/// Mode of every secret file.
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Writes `basic-auth-user` and `basic-auth-password` into the secrets
/// directory.
///
/// Existing non-empty files are never rewritten, so the password generated
/// on the first run survives every later run.
#[derive(Debug, Clone)]
pub struct BasicAuthSecrets<F> {
    filesystem: F,
    user: String,
}

impl<F: Filesystem> BasicAuthSecrets<F> {
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            user: DEFAULT_USER.to_string(),
        }
    }

    /// Use a different admin user name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    fn write_if_absent(
        &self,
        secrets_dir: &Path,
        name: &str,
        value: impl FnOnce() -> String,
    ) -> io::Result<()> {
        let path = secrets_dir.join(name);
        if self.has_content(&path)? {
            debug!(file = %path.display(), "Secret already present, keeping it");
            return Ok(());
        }

        // A partial secret must never appear under its final name.
        let scratch = secrets_dir.join(format!(".{name}.tmp"));
        {
            let mut out = self.filesystem.create_file(&scratch, SECRET_FILE_MODE)?;
            out.write_all(value().as_bytes())?;
            out.flush()?;
        }
        self.filesystem.rename(&scratch, &path)?;
        info!(file = %path.display(), "Secret written");
        Ok(())
    }

    /// An empty file counts as absent.
    fn has_content(&self, path: &Path) -> io::Result<bool> {
        match self.filesystem.entry_kind(path) {
            EntryKind::Missing => Ok(false),
            EntryKind::Directory => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", path.display()),
            )),
            EntryKind::Other => {
                let mut first = [0u8; 1];
                let read = self.filesystem.open_read(path)?.read(&mut first)?;
                Ok(read > 0)
            }
        }
    }
}

impl<F: Filesystem> SecretGenerator for BasicAuthSecrets<F> {
    #[instrument(skip_all, fields(secrets_dir = %secrets_dir.display()))]
    fn generate(&self, secrets_dir: &Path) -> io::Result<()> {
        self.write_if_absent(secrets_dir, USER_FILE, || self.user.clone())?;
        self.write_if_absent(secrets_dir, PASSWORD_FILE, || generate_password(PASSWORD_LEN))?;
        Ok(())
    }
}

/// Random alphanumeric password from the thread-local CSPRNG.
pub fn generate_password(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
