mod auto_scroll;
mod helpers;
mod interactions;
mod projection;
