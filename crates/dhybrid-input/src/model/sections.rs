//! The sixteen sections of a dHybrid input deck, in canonical order.
//!
//! Defaults reproduce a 2-D, 1024×1024-cell periodic box with a single
//! thermal proton species, which is the reference setup the simulation ships
//! with.  All string fields are quoted on output.

use crate::model::section::define_section;
use crate::schema::{Quoting, Shape};

define_section! {
    /// MPI process topology.
    NodeConf => "node_conf" {
        "node_number" => node_number: Vec<i64> = vec![16, 16],
            Shape::Tuple(2), Quoting::Bare, "num of processes in each dimension";
    }
}

define_section! {
    /// Time stepping.
    Time => "time" {
        "dt" => dt: f64 = 0.002,
            Shape::Scalar, Quoting::Bare, "time step";
        "niter" => niter: i64 = 250_000,
            Shape::Scalar, Quoting::Bare, "number of iterations";
        "t0" => t0: f64 = 0.0,
            Shape::Scalar, Quoting::Bare, "initial time";
        "stiter" => stiter: i64 = 0,
            Shape::Scalar, Quoting::Bare, "starting iteration number";
        "c" => c: f64 = 100.0,
            Shape::Scalar, Quoting::Bare, "speed of light";
    }
}

define_section! {
    /// Grid geometry and fluid-electron closure.
    GridSpace => "grid_space" {
        "ncells" => ncells: Vec<i64> = vec![1024, 1024],
            Shape::Tuple(2), Quoting::Bare, "Grid size in number of cells in each dimension";
        "boxsize" => boxsize: Vec<f64> = vec![512.0, 512.0],
            Shape::Tuple(2), Quoting::Bare, "Simulation box size in normalized units";
        "bdtype" => bdtype: Vec<String> = vec!["per".to_string(); 4],
            Shape::Tuple(4), Quoting::Quoted, "Boundary conditions for each dimension";
        "Te" => te: f64 = 1.0,
            Shape::Scalar, Quoting::Bare, "Electron temperature";
        "gamma" => gamma: f64 = 1.66667,
            Shape::Scalar, Quoting::Bare, "Adiabatic index";
    }
}

define_section! {
    /// Global dump control and unit normalisation.
    GlobalOutput => "global_output" {
        "dodump" => dodump: bool = true,
            Shape::Scalar, Quoting::Bare, "if true -> do dump";
        "ndump" => ndump: i64 = 500,
            Shape::Scalar, Quoting::Bare, "num of iter between dumps";
        "B0" => b0: f64 = 3.05191e-7,
            Shape::Scalar, Quoting::Bare, "B field normalization (T)";
        "n0" => n0: f64 = 1e6,
            Shape::Scalar, Quoting::Bare, "density normalization (m-3)";
        "units" => units: String = "NORM".to_string(),
            Shape::Scalar, Quoting::Quoted, "\"NORM\" (normalized) or \"IS\" (int. sys.)";
    }
}

define_section! {
    /// Restart files.
    Restart => "restart" {
        "do_restart" => do_restart: bool = false,
            Shape::Scalar, Quoting::Bare, "restarting previous simulation?";
        "save_restart" => save_restart: bool = true,
            Shape::Scalar, Quoting::Bare, "save restart info on disk?";
        "restart_step" => restart_step: i64 = 5000,
            Shape::Scalar, Quoting::Bare, "num of iter between restart info dumps";
    }
}

define_section! {
    /// External electromagnetic field.
    ///
    /// The component fields are expressions evaluated by the simulation, so
    /// they are strings even when they look like numbers.
    ExtEmf => "ext_emf" {
        "Bx" => bx: String = "0.".to_string(),
            Shape::Scalar, Quoting::Quoted, "External Bx field";
        "By" => by: String = "0.".to_string(),
            Shape::Scalar, Quoting::Quoted, "External By field";
        "Bz" => bz: String = "0.".to_string(),
            Shape::Scalar, Quoting::Quoted, "External Bz field";
        "Ex" => ex: String = "0".to_string(),
            Shape::Scalar, Quoting::Quoted, "External Ex field";
        "Ey" => ey: String = "0".to_string(),
            Shape::Scalar, Quoting::Quoted, "External Ey field";
        "Ez" => ez: String = "0".to_string(),
            Shape::Scalar, Quoting::Quoted, "External Ez field";
        "input_name" => input_name: String = "./input/Bfld_init.unf".to_string(),
            Shape::Scalar, Quoting::Quoted, "Input file name for external EM field";
        "n_constants" => n_constants: i64 = 6,
            Shape::Scalar, Quoting::Bare, "Number of constants";
        "ct" => ct: Vec<f64> = vec![1.0, 0.0, 425.0, 200.0, 1.0, 0.3],
            Shape::List, Quoting::Bare, "Background magnetic field parameters";
    }
}

define_section! {
    /// Which field components are dumped.
    FieldDiag => "field_diag" {
        "dmp_efld" => dmp_efld: Vec<bool> = vec![false, false, true, true],
            Shape::Tuple(4), Quoting::Bare, "Dump electric field components";
        "dmp_bfld" => dmp_bfld: Vec<bool> = vec![false, false, true, true],
            Shape::Tuple(4), Quoting::Bare, "Dump magnetic field components";
        "dmp_jfld" => dmp_jfld: Vec<bool> = vec![false, false],
            Shape::Tuple(2), Quoting::Bare, "Dump current field components";
    }
}

define_section! {
    /// Field smoothing and sub-iteration tuning.
    Algorithm => "algorithm" {
        "ifsmooth" => ifsmooth: bool = true,
            Shape::Scalar, Quoting::Bare, "Smooth fields? default = true";
        "ifsmoothextfields" => ifsmoothextfields: bool = true,
            Shape::Scalar, Quoting::Bare, "Smooth external fields? default = true";
        "filternpass" => filternpass: i64 = 8,
            Shape::Scalar, Quoting::Bare, "Number of filter passes";
        "compensate" => compensate: bool = true,
            Shape::Scalar, Quoting::Bare, "Use compensator in filter? default = true";
        "subniter" => subniter: i64 = 8,
            Shape::Scalar, Quoting::Bare, "Number of subiterations";
        "allowederror" => allowederror: f64 = 1.0,
            Shape::Scalar, Quoting::Bare, "Allowed error in subiteration field calculation";
    }
}

define_section! {
    /// Load balancing between processes.
    LoadBalance => "loadbalance" {
        "loadbalance" => loadbalance: bool = false,
            Shape::Scalar, Quoting::Bare, "Do any load balance? default= true";
        "ifdynamicloadbalance" => ifdynamicloadbalance: bool = false,
            Shape::Scalar, Quoting::Bare, "Do dynamic load balance? default = true";
        "dynamicloadbalancestep" => dynamicloadbalancestep: i64 = 500,
            Shape::Scalar, Quoting::Bare, "Number of iterations between dynamic load balance";
    }
}

define_section! {
    /// Species count and particle sorting.
    Particles => "particles" {
        "num_species" => num_species: i64 = 1,
            Shape::Scalar, Quoting::Bare, "Number of species";
        "part_sort_step" => part_sort_step: i64 = 25,
            Shape::Scalar, Quoting::Bare, "Number of steps between sorting";
    }
}

define_section! {
    /// Parameters of one particle species.
    Species => "species" {
        "name" => name: String = "H+".to_string(),
            Shape::Scalar, Quoting::Quoted, "Species name";
        "dist" => dist: String = "THERMAL".to_string(),
            Shape::Scalar, Quoting::Quoted, "Type of velocity distribution (THERMAL or ISO)";
        "num_par" => num_par: Vec<i64> = vec![10, 10],
            Shape::Tuple(2), Quoting::Bare, "Number of particles per cell";
        "spare_size" => spare_size: f64 = 0.1,
            Shape::Scalar, Quoting::Bare, "% (0 to 1) of unused space in part vector";
        "ir" => ir: i64 = 1,
            Shape::Scalar, Quoting::Bare, "Ionization ratio";
        "rqm" => rqm: f64 = 1.0,
            Shape::Scalar, Quoting::Bare, "Charge to mass ratio (inverse)";
        "vdrift" => vdrift: Vec<f64> = vec![0.0, 0.0, 0.0],
            Shape::Tuple(3), Quoting::Bare, "Drift velocity";
        "vth" => vth: f64 = 0.1,
            Shape::Scalar, Quoting::Bare, "Thermal velocity";
        "kin_push" => kin_push: bool = true,
            Shape::Scalar, Quoting::Bare, "True -> kinetic push, false -> MHD";
        "ion_t" => ion_t: f64 = 8.0,
            Shape::Scalar, Quoting::Bare, "Ionization time";
        "nsp" => nsp: String = "1.".to_string(),
            Shape::Scalar, Quoting::Quoted, "Species number density";
        "input_name" => input_name: String = "./input/vfld_init.unf".to_string(),
            Shape::Scalar, Quoting::Quoted, "Input file name for velocity field";
        "n_constants" => n_constants: i64 = 5,
            Shape::Scalar, Quoting::Bare, "Number of constants in density definition";
        "ct" => ct: Vec<f64> = vec![1.0, 200.0, 1.0, 0.1, 0.1],
            Shape::List, Quoting::Bare, "Density parameters";
        "follow" => follow: bool = true,
            Shape::Scalar, Quoting::Bare, "Follow particles? default=false";
    }
}

define_section! {
    /// Particle boundary conditions.
    BoundaryConditions => "boundary_conditions" {
        "bdtype" => bdtype: Vec<String> = vec!["per".to_string(); 4],
            Shape::Tuple(4), Quoting::Quoted, "Boundary conditions for each wall";
        "vth" => vth: f64 = 0.0,
            Shape::Scalar, Quoting::Bare, "Thermal bath velocity (ignored for others)";
    }
}

define_section! {
    /// Per-species moment and phase-space dumps.
    DiagSpecies => "diag_species" {
        "dmp_vfld" => dmp_vfld: Vec<bool> = vec![false, true],
            Shape::Tuple(2), Quoting::Bare, "Dump velocity field";
        "dmp_pfld" => dmp_pfld: Vec<bool> = vec![false, true],
            Shape::Tuple(2), Quoting::Bare, "Dump pressure field";
        "phasespaces" => phasespaces: Vec<String> = ["x3x2x1", "p1x1", "Etx1", "p2x1", "p3x1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Shape::List, Quoting::Quoted, "Phase spaces to dump";
        "pres" => pres: Vec<i64> = vec![512, 512, 512],
            Shape::Tuple(3), Quoting::Bare, "Resolution for phase space (defaults to 512)";
        "xres" => xres: Vec<i64> = vec![256, 256],
            Shape::Tuple(2), Quoting::Bare, "Resolution for x space";
    }
}

define_section! {
    /// Raw particle dumps.
    RawDiag => "raw_diag" {
        "raw_dump" => raw_dump: bool = false,
            Shape::Scalar, Quoting::Bare, "Turn on or off raw dumps";
        "raw_ndump" => raw_ndump: i64 = 1000,
            Shape::Scalar, Quoting::Bare, "Number of iterations between raw dumps";
        "raw_dump_fraction" => raw_dump_fraction: f64 = 1.0,
            Shape::Scalar, Quoting::Bare, "Fraction of raw dumps";
        "v_min" => v_min: f64 = 80.0,
            Shape::Scalar, Quoting::Bare, "Minimum velocity for raw dumps";
    }
}

define_section! {
    /// Particle tracking.
    TrackDiag => "track_diag" {
        "track_dump" => track_dump: bool = false,
            Shape::Scalar, Quoting::Bare, "Turn on or off track dumps (if on, follow=true)";
        "track_fields" => track_fields: bool = true,
            Shape::Scalar, Quoting::Bare, "Track fields in particle positions";
        "track_ndump" => track_ndump: i64 = 1000,
            Shape::Scalar, Quoting::Bare, "Number of iterations between track dumps";
        "track_nstore" => track_nstore: i64 = 5,
            Shape::Scalar, Quoting::Bare,
            "Values are stored every iteration if =1, every other iter if =2, etc";
        "track_info_file" => track_info_file: String = "./input/H+.tags".to_string(),
            Shape::Scalar, Quoting::Quoted, "Track information (particle tags to track)";
    }
}

define_section! {
    /// Diagnostics summed over all species.
    DiagSpeciesTotal => "diag_species_total" {
        "dmp_vfld" => dmp_vfld: Vec<bool> = vec![false, false],
            Shape::Tuple(2), Quoting::Bare, "Dump total velocity field";
        "pres" => pres: Vec<i64> = vec![512, 512, 512],
            Shape::Tuple(3), Quoting::Bare, "Resolution for total phase space (defaults to 512)";
    }
}
