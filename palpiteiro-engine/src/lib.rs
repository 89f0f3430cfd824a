//! Núcleo de análise e palpites para loterias de dezenas.
//!
//! Tudo aqui é puro: entra histórico cru e configuração, sai estatística,
//! sinal e jogo. Leitura de arquivos, banco e terminal moram nos crates
//! vizinhos.

pub mod engines;
pub mod row;
pub mod signal;
pub mod stats;
pub mod strategy;
pub mod variant;
