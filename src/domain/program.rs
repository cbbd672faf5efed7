use crate::domain::allocation::ValuationMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

/// Relation between a constraint's left-hand side and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

/// A continuous variable. `None` bounds are infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct LpVariable {
    pub id: String,
    pub objective: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Sparse linear constraint over variable indices
#[derive(Debug, Clone, PartialEq)]
pub struct LpConstraint {
    pub terms: Vec<(usize, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

/// Solver-neutral linear program handed to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub direction: Direction,
    pub variables: Vec<LpVariable>,
    pub constraints: Vec<LpConstraint>,
}

impl LinearProgram {
    pub fn new(direction: Direction) -> Self {
        LinearProgram {
            direction,
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Append a variable and return its index
    pub fn add_variable(&mut self, variable: LpVariable) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, terms: Vec<(usize, f64)>, relation: Relation, rhs: f64) {
        self.constraints.push(LpConstraint {
            terms,
            relation,
            rhs,
        });
    }
}

/// Values a backend found for a program, one per variable in program order
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub values: Vec<f64>,
    pub objective: f64,
}

/// Where the max-min program keeps its variables.
///
/// Share `A[i][j]` lives at `i * num_resources + j`, the floor variable `m`
/// comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMinLayout {
    pub num_agents: usize,
    pub num_resources: usize,
}

impl MaxMinLayout {
    pub fn of(valuations: &ValuationMatrix) -> Self {
        MaxMinLayout {
            num_agents: valuations.num_agents(),
            num_resources: valuations.num_resources(),
        }
    }

    pub fn share_index(&self, agent: usize, resource: usize) -> usize {
        agent * self.num_resources + resource
    }

    pub fn min_utility_index(&self) -> usize {
        self.num_agents * self.num_resources
    }

    pub fn num_variables(&self) -> usize {
        self.min_utility_index() + 1
    }
}

/// Encode max-min fairness as a linear program:
///
/// ```text
/// maximize   m
/// subject to sum_i A[i][j] = 1               for every resource j
///            sum_j V[i][j] * A[i][j] - m >= 0  for every agent i
///            A[i][j] >= 0
/// ```
pub fn build_max_min_program(valuations: &ValuationMatrix) -> LinearProgram {
    let layout = MaxMinLayout::of(valuations);
    let mut program = LinearProgram::new(Direction::Maximize);

    for agent in 0..layout.num_agents {
        for resource in 0..layout.num_resources {
            program.add_variable(LpVariable {
                id: format!("share[{}][{}]", agent, resource),
                objective: 0.0,
                lower: Some(0.0),
                upper: None,
            });
        }
    }

    let floor = program.add_variable(LpVariable {
        id: "min_utility".to_string(),
        objective: 1.0,
        lower: None,
        upper: None,
    });
    debug_assert_eq!(floor, layout.min_utility_index());

    for resource in 0..layout.num_resources {
        let terms = (0..layout.num_agents)
            .map(|agent| (layout.share_index(agent, resource), 1.0))
            .collect();
        program.add_constraint(terms, Relation::Equal, 1.0);
    }

    for agent in 0..layout.num_agents {
        let mut terms: Vec<(usize, f64)> = valuations
            .row(agent)
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0.0)
            .map(|(resource, &value)| (layout.share_index(agent, resource), value))
            .collect();
        terms.push((floor, -1.0));
        program.add_constraint(terms, Relation::GreaterOrEqual, 0.0);
    }

    program
}
