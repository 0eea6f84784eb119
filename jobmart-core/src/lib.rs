// jobmart-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrat de stockage columnaire (Connector)
pub mod ports;

// 2. Domain (Cœur du métier)
// Bronze / Silver / Gold, configuration, quality gate.
// Ne dépend ni de l'infra ni de l'app.
pub mod domain;

// 3. Infrastructure (Adapters)
// DataFusion, codecs Arrow, config YAML, fichiers atomiques.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration des stages, résumé, checkpoints, clean.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use jobmart_core::PipelineError;
pub use error::PipelineError;
