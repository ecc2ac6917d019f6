// Library root: the terminal host, exposed so its state and widgets can be
// tested without a real terminal.

pub mod tui;
