pub mod buckaroo;

pub use self::buckaroo::Klarna;
