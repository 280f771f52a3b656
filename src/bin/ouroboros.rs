// Interactive host for one ring channel.
//
//   write <text>   append a record through a write session
//   cat            open a read session and read until EOF
//   stat           print the channel cursors
//   quit           unload and exit
//
// OUROBOROS_CAPACITY / OUROBOROS_RECORD_SIZE override the channel shape,
// RUST_LOG controls log output.
use ouroboros_ring::{AccessMode, ChannelBuilder, Module, Registry, Session};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn env_usize(key: &str) -> io::Result<Option<usize>> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{key}={raw:?}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Read `session` until EOF like cat(1), copying bytes to `out`.
///
/// Returns whether a record was delivered; a zero-length record counts.
fn cat(session: &mut Session, out: &mut impl Write) -> io::Result<bool> {
    let mut buf = vec![0u8; session.channel().record_size()];
    loop {
        let n = session.read(&mut buf[..])?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])?;
    }
    Ok(session.position().is_exhausted())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut builder = ChannelBuilder::new();
    if let Some(capacity) = env_usize("OUROBOROS_CAPACITY")? {
        builder = builder.with_capacity(capacity);
    }
    if let Some(record_size) = env_usize("OUROBOROS_RECORD_SIZE")? {
        builder = builder.with_record_size(record_size);
    }

    let mut module = Module::load(Arc::new(Registry::new()), builder)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let (cmd, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));

        match cmd {
            "write" => {
                let mut session = module.open(AccessMode::WriteOnly)?;
                let accepted = session.write(rest)?;
                writeln!(stdout, "accepted {accepted} bytes")?;
            }
            "cat" => {
                let mut session = module.open(AccessMode::ReadOnly)?;
                if cat(&mut session, &mut stdout)? {
                    writeln!(stdout)?;
                } else {
                    writeln!(stdout, "(empty)")?;
                }
            }
            "stat" => {
                let c = module.channel().cursors();
                writeln!(
                    stdout,
                    "head={} tail={} count={}/{}",
                    c.head,
                    c.tail,
                    c.count,
                    module.channel().capacity()
                )?;
            }
            "quit" => break,
            "" => {}
            other => writeln!(stdout, "unknown command: {other}")?,
        }
        stdout.flush()?;
    }

    module.unload();
    Ok(())
}
