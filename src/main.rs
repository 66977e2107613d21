use std::io;
use symlog::repl::Repl;

fn main() -> io::Result<()> {
    symlog::trace::init_subscriber();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new();
    repl.run(&mut stdin.lock(), &mut stdout.lock())
}
